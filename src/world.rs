//! Snapshot types - a serializable view of the simulation state.
//!
//! Snapshots are what an external renderer or turn scheduler reads each
//! tick; they reflect the ECS world at the moment they are taken and can be
//! encoded as JSON for non-Rust frontends.

use crate::components::*;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Snapshot of a single worm's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WormSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub w: f32,
    pub h: f32,
    pub health: f32,
    pub health_max: f32,
    pub aim: f32,
    pub ammo: u32,
    pub alive: bool,
}

/// Snapshot of a shell in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub weapon: String,
}

/// Snapshot of a live explosion effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionSnapshot {
    /// Blast center.
    pub x: f32,
    pub y: f32,
    /// Envelope radius at the snapshot tick.
    pub radius: f32,
    pub max_radius: f32,
    pub lifetime_fraction: f32,
}

/// Snapshot of an uncollected supply crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectableSnapshot {
    pub x: f32,
    pub y: f32,
    pub kind: String,
    pub value: u32,
}

/// Complete per-tick state snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Simulation tick the snapshot was taken at.
    pub tick: u64,
    pub worms: Vec<WormSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub explosions: Vec<ExplosionSnapshot>,
    pub collectables: Vec<CollectableSnapshot>,
}

impl Snapshot {
    /// Create a snapshot from the ECS world.
    pub fn from_world(world: &mut World, tick: u64) -> Self {
        let mut worms = Vec::new();
        let mut query =
            world.query::<(&WormId, &Position, &Velocity, &Extent, &Health, &Aim, &Ammo)>();
        for (id, pos, vel, extent, health, aim, ammo) in query.iter(world) {
            worms.push(WormSnapshot {
                id: id.0,
                x: pos.x,
                y: pos.y,
                vx: vel.vx,
                vy: vel.vy,
                w: extent.w,
                h: extent.h,
                health: health.current,
                health_max: health.max,
                aim: aim.angle,
                ammo: ammo.rounds,
                alive: health.is_alive(),
            });
        }

        let mut projectiles = Vec::new();
        let mut query = world.query::<(&ProjectileId, &Projectile, &Position, &Velocity)>();
        for (id, shell, pos, vel) in query.iter(world) {
            projectiles.push(ProjectileSnapshot {
                id: id.0,
                x: pos.x,
                y: pos.y,
                vx: vel.vx,
                vy: vel.vy,
                weapon: shell.weapon.name().to_string(),
            });
        }

        let mut explosions = Vec::new();
        let mut query = world.query::<(&Explosion, &Position)>();
        for (explosion, pos) in query.iter(world) {
            explosions.push(ExplosionSnapshot {
                x: pos.x,
                y: pos.y,
                radius: explosion.current_radius(),
                max_radius: explosion.max_radius,
                lifetime_fraction: explosion.lifetime_fraction(),
            });
        }

        let mut collectables = Vec::new();
        let mut query = world.query::<(&Collectable, &Position)>();
        for (collectable, pos) in query.iter(world) {
            collectables.push(CollectableSnapshot {
                x: pos.x,
                y: pos.y,
                kind: collectable.kind.name().to_string(),
                value: collectable.value,
            });
        }

        Self {
            tick,
            worms,
            projectiles,
            explosions,
            collectables,
        }
    }

    /// Serialize the snapshot to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize the snapshot to a pretty JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_collects_every_entity_class() {
        let mut world = World::new();
        world.spawn(WormBundle::new(3, 100.0, 50.0, 30.0));
        world.spawn(ProjectileBundle::new(
            ProjectileId(0),
            WeaponKind::Grenade,
            200.0,
            60.0,
            4.0,
            -2.0,
            8.0,
        ));
        world.spawn(ExplosionBundle::new(300.0, 70.0, 40.0, 30));
        world.spawn(CollectableBundle::new(Collectable::ammo(5), 400.0, 80.0, 14.0));

        let snapshot = Snapshot::from_world(&mut world, 7);

        assert_eq!(snapshot.tick, 7);
        assert_eq!(snapshot.worms.len(), 1);
        assert_eq!(snapshot.projectiles.len(), 1);
        assert_eq!(snapshot.explosions.len(), 1);
        assert_eq!(snapshot.collectables.len(), 1);

        let worm = &snapshot.worms[0];
        assert_eq!(worm.id, 3);
        assert!(worm.alive);
        assert_eq!(snapshot.projectiles[0].weapon, "Grenade");
        assert_eq!(snapshot.collectables[0].kind, "Ammo");
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let mut world = World::new();
        world.spawn(WormBundle::new(0, 100.0, 50.0, 30.0));

        let snapshot = Snapshot::from_world(&mut world, 1);
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"worms\""));

        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.worms.len(), 1);
        assert_eq!(parsed.tick, 1);
    }
}
