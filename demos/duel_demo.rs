//! Scripted demonstration duel.
//!
//! Stands in for the excluded game-loop collaborator: rotates turns across
//! four worms, issues movement and fire commands, and prints snapshots.
//!
//! Run with: cargo run --example duel_demo

use scorched_sim::{DuelWorld, WeaponKind};

fn main() {
    println!("=== Scorched Ground - Artillery Duel Demo ===\n");

    let mut sim = DuelWorld::new_default_duel();

    // Let everyone drop onto the terrain before the first turn.
    sim.run(90);
    println!("Initial state (tick {}):", sim.current_tick());
    print_state(&mut sim);

    // Fixed aim/weapon tables stand in for player input.
    let aims = [-0.7, -1.2, -2.0, -2.4];
    let weapons = [
        WeaponKind::Bazooka,
        WeaponKind::Grenade,
        WeaponKind::AirStrike,
        WeaponKind::Shotgun,
    ];

    for turn in 0..8usize {
        let worm = (turn % 4) as u32;
        sim.command_move(worm, if worm % 2 == 0 { 10.0 } else { -10.0 });
        sim.command_aim(worm, aims[turn % 4]);
        sim.command_fire(worm, weapons[turn % 4]);

        // One turn: projectile flight, explosion, and settling.
        sim.run(180);

        println!("\n--- after turn {} (tick {}) ---", turn, sim.current_tick());
        print_state(&mut sim);

        let living = sim.living_worms();
        if living.len() <= 1 {
            println!("\nDuel over, survivors: {:?}", living);
            break;
        }
    }

    println!("\n=== Final state (JSON) ===\n");
    println!("{}", sim.snapshot().to_json_pretty().unwrap());
}

fn print_state(sim: &mut DuelWorld) {
    let solid = sim.terrain().solid_count();
    let snapshot = sim.snapshot();

    for worm in &snapshot.worms {
        println!(
            "  Worm {}: pos=({:.1}, {:.1}) hp={:.0}/{:.0} ammo={} {}",
            worm.id,
            worm.x,
            worm.y,
            worm.health,
            worm.health_max,
            worm.ammo,
            if worm.alive { "" } else { "[dead]" }
        );
    }
    println!(
        "  terrain: {} solid cells, {} shells in flight, {} explosions",
        solid,
        snapshot.projectiles.len(),
        snapshot.explosions.len()
    );
}
