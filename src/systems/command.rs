//! Command intake - translates queued worm commands into state changes.

use crate::components::*;
use crate::config::SimConfig;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// A single command addressed to a worm. Produced by whatever drives the
/// simulation (turn scheduler, input layer, scripted AI); the core treats
/// commands as opaque inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Horizontal movement by a signed delta, in world units.
    Move { dx: f32 },
    /// Set the aim angle, in radians.
    Aim { angle: f32 },
    /// Jump. Effective only while grounded (zero vertical velocity).
    Jump,
    /// Fire one round of the given weapon along the current aim angle.
    Fire { weapon: WeaponKind },
}

/// Commands queued for the next tick, in arrival order.
#[derive(Resource, Debug, Default)]
pub struct PendingCommands {
    queue: Vec<(u32, Command)>,
}

impl PendingCommands {
    pub fn push(&mut self, worm: u32, command: Command) {
        self.queue.push((worm, command));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> Vec<(u32, Command)> {
        std::mem::take(&mut self.queue)
    }
}

/// System that drains pending commands in arrival order. Commands addressed
/// to unknown or dead worms are ignored.
pub fn command_system(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut pending: ResMut<PendingCommands>,
    mut ids: ResMut<ProjectileIds>,
    mut worms: Query<(
        &WormId,
        &mut Position,
        &mut Velocity,
        &Extent,
        &mut Aim,
        &mut Ammo,
        &Health,
    )>,
) {
    for (target, command) in pending.drain() {
        for (id, mut pos, mut vel, extent, mut aim, mut ammo, health) in worms.iter_mut() {
            if id.0 != target {
                continue;
            }
            if !health.is_alive() {
                break;
            }

            match command {
                Command::Move { dx } => pos.x += dx,
                Command::Aim { angle } => aim.angle = angle,
                Command::Jump => {
                    if vel.vy == 0.0 {
                        vel.vy = config.jump_impulse;
                    }
                }
                Command::Fire { weapon } => {
                    if ammo.spend() {
                        let (cx, cy) = extent.center_at(&pos);
                        let speed = weapon.muzzle_speed();
                        commands.spawn(ProjectileBundle::new(
                            ids.allocate(),
                            weapon,
                            cx,
                            cy,
                            aim.angle.cos() * speed,
                            aim.angle.sin() * speed,
                            config.projectile_size,
                        ));
                    }
                }
            }
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command_world() -> (World, Schedule) {
        let mut world = World::new();
        world.insert_resource(SimConfig::default());
        world.insert_resource(PendingCommands::default());
        world.insert_resource(ProjectileIds::default());

        let mut schedule = Schedule::default();
        schedule.add_systems(command_system);
        (world, schedule)
    }

    fn queue(world: &mut World, worm: u32, command: Command) {
        world.resource_mut::<PendingCommands>().push(worm, command);
    }

    #[test]
    fn test_move_and_aim() {
        let (mut world, mut schedule) = command_world();
        world.spawn(WormBundle::new(0, 100.0, 50.0, 30.0));

        queue(&mut world, 0, Command::Move { dx: -2.0 });
        queue(&mut world, 0, Command::Aim { angle: 1.5 });
        schedule.run(&mut world);

        let mut query = world.query::<(&Position, &Aim)>();
        let (pos, aim) = query.single(&world);
        assert!((pos.x - 98.0).abs() < 0.001);
        assert!((aim.angle - 1.5).abs() < 0.001);
    }

    #[test]
    fn test_jump_requires_grounded() {
        let (mut world, mut schedule) = command_world();
        let worm = world.spawn(WormBundle::new(0, 100.0, 50.0, 30.0)).id();

        queue(&mut world, 0, Command::Jump);
        schedule.run(&mut world);
        let vy = world.get::<Velocity>(worm).unwrap().vy;
        assert!((vy - SimConfig::default().jump_impulse).abs() < 0.001);

        // Already moving vertically: jump is ignored.
        world.get_mut::<Velocity>(worm).unwrap().vy = 3.0;
        queue(&mut world, 0, Command::Jump);
        schedule.run(&mut world);
        assert_eq!(world.get::<Velocity>(worm).unwrap().vy, 3.0);
    }

    #[test]
    fn test_fire_spawns_projectile_and_spends_ammo() {
        let (mut world, mut schedule) = command_world();
        let worm = world.spawn(WormBundle::new(0, 100.0, 50.0, 30.0)).id();

        queue(&mut world, 0, Command::Aim { angle: 0.0 });
        queue(&mut world, 0, Command::Fire { weapon: WeaponKind::Bazooka });
        schedule.run(&mut world);

        assert_eq!(world.get::<Ammo>(worm).unwrap().rounds, 9);

        let mut query = world.query::<(&Projectile, &Velocity, &Position)>();
        let (shell, vel, pos) = query.single(&world);
        assert_eq!(shell.weapon, WeaponKind::Bazooka);
        // Aimed right: full muzzle speed on x, none on y.
        assert!((vel.vx - 8.0).abs() < 0.001);
        assert!(vel.vy.abs() < 0.001);
        // Spawned centered on the worm center (115, 65).
        assert!((pos.x + 4.0 - 115.0).abs() < 0.001);
        assert!((pos.y + 4.0 - 65.0).abs() < 0.001);
    }

    #[test]
    fn test_fire_without_ammo_is_ignored() {
        let (mut world, mut schedule) = command_world();
        let worm = world.spawn(WormBundle::new(0, 100.0, 50.0, 30.0)).id();
        world.get_mut::<Ammo>(worm).unwrap().rounds = 0;

        queue(&mut world, 0, Command::Fire { weapon: WeaponKind::Bazooka });
        schedule.run(&mut world);

        let mut query = world.query::<&Projectile>();
        assert_eq!(query.iter(&world).count(), 0);
    }

    #[test]
    fn test_unknown_and_dead_worms_are_ignored() {
        let (mut world, mut schedule) = command_world();
        let worm = world.spawn(WormBundle::new(0, 100.0, 50.0, 30.0)).id();
        world.get_mut::<Health>(worm).unwrap().damage(1000.0);

        queue(&mut world, 7, Command::Move { dx: 5.0 }); // no such worm
        queue(&mut world, 0, Command::Move { dx: 5.0 }); // dead worm
        schedule.run(&mut world);

        assert_eq!(world.get::<Position>(worm).unwrap().x, 100.0);
    }
}
