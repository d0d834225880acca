//! Public API for the simulation.
//!
//! `DuelWorld` is the session object: it owns the ECS world (terrain grid,
//! worms, projectiles, crates, explosions) and the system schedule, and
//! exposes the per-tick advance plus command and query surfaces to whatever
//! drives the match - game loop, turn scheduler, renderer.
//!
//! ## Fixed timestep
//!
//! One call to `step()` advances exactly one fixed tick. All tuning
//! constants are expressed per tick; there is no variable-delta path, so a
//! caller that replays the same command sequence gets the same state.

use crate::components::*;
use crate::config::SimConfig;
use crate::systems::*;
use crate::systems::command::Command;
use crate::terrain::{TerrainGrid, TerrainSnapshot};
use crate::world::Snapshot;
use bevy_ecs::prelude::*;

/// The main simulation session.
pub struct DuelWorld {
    world: World,
    schedule: Schedule,
    tick: u64,
}

impl DuelWorld {
    /// Create an empty session on default-tuned rolling-hill terrain.
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    /// Create an empty session with custom tuning.
    pub fn with_config(config: SimConfig) -> Self {
        let mut world = World::new();

        world.insert_resource(TerrainGrid::new(
            config.world_width,
            config.world_height,
            config.cell_size,
        ));
        world.insert_resource(PendingCommands::default());
        world.insert_resource(ProjectileIds::default());
        world.insert_resource(config);

        // One tick: commands, then worm/crate physics, then projectiles,
        // then pickups, then explosion lifetimes. The chain order is the
        // determinism contract.
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                command_system,
                body_physics_system,
                projectile_system,
                pickup_system,
                explosion_system,
            )
                .chain(),
        );

        Self {
            world,
            schedule,
            tick: 0,
        }
    }

    /// Create a session with four worms spread over the default terrain,
    /// plus a couple of supply crates.
    pub fn new_default_duel() -> Self {
        let mut sim = Self::new();
        for (i, x) in [100.0, 300.0, 500.0, 700.0].into_iter().enumerate() {
            sim.spawn_worm(i as u32, x, 100.0);
        }
        sim.spawn_collectable(Collectable::health(25), 250.0, 50.0);
        sim.spawn_collectable(Collectable::ammo(5), 450.0, 50.0);
        sim
    }

    /// Advance the simulation by exactly one fixed tick.
    pub fn step(&mut self) {
        self.schedule.run(&mut self.world);
        self.tick += 1;
    }

    /// Advance the simulation by `n` ticks.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Get the current tick number.
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Queue a command for the next tick. Commands addressed to unknown or
    /// dead worms are ignored when drained.
    pub fn push_command(&mut self, worm: u32, command: Command) {
        self.world
            .resource_mut::<PendingCommands>()
            .push(worm, command);
    }

    /// Queue a horizontal move by `dx` world units.
    pub fn command_move(&mut self, worm: u32, dx: f32) {
        self.push_command(worm, Command::Move { dx });
    }

    /// Queue an aim-angle update.
    pub fn command_aim(&mut self, worm: u32, angle: f32) {
        self.push_command(worm, Command::Aim { angle });
    }

    /// Queue a jump.
    pub fn command_jump(&mut self, worm: u32) {
        self.push_command(worm, Command::Jump);
    }

    /// Queue a fire request for the given weapon.
    pub fn command_fire(&mut self, worm: u32, weapon: WeaponKind) {
        self.push_command(worm, Command::Fire { weapon });
    }

    // ------------------------------------------------------------------
    // Spawning
    // ------------------------------------------------------------------

    /// Spawn a worm at the given top-left position.
    pub fn spawn_worm(&mut self, id: u32, x: f32, y: f32) {
        let size = self.config().worm_size;
        self.world.spawn(WormBundle::new(id, x, y, size));
    }

    /// Spawn a supply crate at the given top-left position. It falls and
    /// rests like a worm until someone walks into it.
    pub fn spawn_collectable(&mut self, collectable: Collectable, x: f32, y: f32) {
        let size = self.config().crate_size;
        self.world
            .spawn(CollectableBundle::new(collectable, x, y, size));
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> SimConfig {
        *self.world.resource::<SimConfig>()
    }

    /// Get a snapshot of the current simulation state.
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot::from_world(&mut self.world, self.tick)
    }

    /// Get the snapshot as a JSON string.
    pub fn snapshot_json(&mut self) -> String {
        self.snapshot().to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the terrain grid, for solid-cell enumeration by a renderer.
    pub fn terrain(&self) -> &TerrainGrid {
        self.world.resource::<TerrainGrid>()
    }

    /// Get a full terrain snapshot.
    pub fn terrain_snapshot(&self) -> TerrainSnapshot {
        TerrainSnapshot::from_grid(self.terrain())
    }

    /// Get the terrain snapshot as JSON.
    pub fn terrain_snapshot_json(&self) -> String {
        serde_json::to_string(&self.terrain_snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Ids of all worms still alive, sorted. The turn scheduler's
    /// elimination and win checks read this.
    pub fn living_worms(&mut self) -> Vec<u32> {
        let mut query = self.world.query::<(&WormId, &Health)>();
        let mut ids: Vec<u32> = query
            .iter(&self.world)
            .filter(|(_, health)| health.is_alive())
            .map(|(id, _)| id.0)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Current health of a worm, if it exists.
    pub fn worm_health(&mut self, worm: u32) -> Option<f32> {
        let mut query = self.world.query::<(&WormId, &Health)>();
        query
            .iter(&self.world)
            .find(|(id, _)| id.0 == worm)
            .map(|(_, health)| health.current)
    }

    /// Direct access to the ECS world, for advanced callers.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the ECS world, for advanced callers.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl Default for DuelWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_new_world_starts_at_tick_zero() {
        let sim = DuelWorld::new();
        assert_eq!(sim.current_tick(), 0);
    }

    #[test]
    fn test_step_advances_tick() {
        let mut sim = DuelWorld::new();
        sim.step();
        assert_eq!(sim.current_tick(), 1);
        sim.run(5);
        assert_eq!(sim.current_tick(), 6);
    }

    #[test]
    fn test_default_duel_snapshot() {
        let mut sim = DuelWorld::new_default_duel();
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.worms.len(), 4);
        assert_eq!(snapshot.collectables.len(), 2);
        assert!(snapshot.projectiles.is_empty());
        assert!(snapshot.explosions.is_empty());
    }

    #[test]
    fn test_worms_settle_on_the_terrain() {
        let mut sim = DuelWorld::new_default_duel();
        sim.run(300);

        let config = sim.config();
        let snapshot = sim.snapshot();
        for worm in &snapshot.worms {
            // Settled worms hover in the gravity/retraction cycle: vertical
            // speed never builds past a few gravity steps.
            assert!(worm.vy.abs() < 1.0, "worm {} still falling", worm.id);
            let rect = Extent::square(config.worm_size)
                .rect_at(&Position::new(worm.x, worm.y));
            assert!(!sim.terrain().intersects(&rect));
        }

        // And they stay put from here on.
        let before: Vec<f32> = snapshot.worms.iter().map(|w| w.y).collect();
        sim.run(10);
        let after = sim.snapshot();
        for (worm, y0) in after.worms.iter().zip(before) {
            assert!((worm.y - y0).abs() <= 1.5, "worm {} drifted", worm.id);
        }
    }

    #[test]
    fn test_move_command_shifts_worm() {
        let mut sim = DuelWorld::new_default_duel();
        sim.run(120); // settle first
        let before = sim
            .snapshot()
            .worms
            .iter()
            .find(|w| w.id == 0)
            .unwrap()
            .x;

        sim.command_move(0, 8.0);
        sim.step();

        let after = sim
            .snapshot()
            .worms
            .iter()
            .find(|w| w.id == 0)
            .unwrap()
            .x;
        assert!((after - (before + 8.0)).abs() < 0.001);
    }

    #[test]
    fn test_firing_straight_down_wounds_the_shooter() {
        let mut sim = DuelWorld::new_default_duel();
        sim.run(120);
        let solid_before = sim.terrain().solid_count();

        sim.command_aim(0, FRAC_PI_2);
        sim.command_fire(0, WeaponKind::Bazooka);
        sim.run(4);

        assert!(sim.terrain().solid_count() < solid_before, "impact must carve");
        let health = sim.worm_health(0).unwrap();
        assert!(health < 100.0, "point-blank blast must wound the shooter");
        assert!(!sim.snapshot().explosions.is_empty());

        // Ammo was spent by the one shot.
        let snapshot = sim.snapshot();
        let worm = snapshot.worms.iter().find(|w| w.id == 0).unwrap();
        assert_eq!(worm.ammo, 9);
    }

    #[test]
    fn test_snapshot_json_surface() {
        let mut sim = DuelWorld::new_default_duel();
        let json = sim.snapshot_json();
        assert!(json.contains("\"worms\""));
        assert!(json.contains("\"tick\""));

        let terrain_json = sim.terrain_snapshot_json();
        assert!(terrain_json.contains("\"cell_size\""));
    }

    #[test]
    fn test_living_worms_tracks_eliminations() {
        let mut sim = DuelWorld::new_default_duel();
        assert_eq!(sim.living_worms(), vec![0, 1, 2, 3]);

        let mut query = sim.world_mut().query::<(&WormId, &mut Health)>();
        for (id, mut health) in query.iter_mut(sim.world_mut()) {
            if id.0 == 2 {
                health.damage(1000.0);
            }
        }

        assert_eq!(sim.living_worms(), vec![0, 1, 3]);
        assert_eq!(sim.worm_health(2), Some(0.0));
        assert_eq!(sim.worm_health(9), None);
    }
}
