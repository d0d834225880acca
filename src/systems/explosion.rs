//! Explosion lifetime - envelope advance and pruning.
//!
//! Damage is applied when the blast is spawned (see the projectile
//! system); advancing the effect never re-applies it.

use crate::components::*;
use bevy_ecs::prelude::*;

/// System that ages every explosion by one tick and prunes the expired
/// ones.
pub fn explosion_system(mut commands: Commands, mut explosions: Query<(Entity, &mut Explosion)>) {
    for (entity, mut explosion) in explosions.iter_mut() {
        explosion.frame += 1;
        if explosion.is_expired() {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explosion_world() -> (World, Schedule) {
        let world = World::new();
        let mut schedule = Schedule::default();
        schedule.add_systems(explosion_system);
        (world, schedule)
    }

    #[test]
    fn test_explosion_is_pruned_at_end_of_life() {
        let (mut world, mut schedule) = explosion_world();
        world.spawn(ExplosionBundle::new(100.0, 100.0, 40.0, 30));

        let mut query = world.query::<&Explosion>();
        for _ in 0..29 {
            schedule.run(&mut world);
            assert_eq!(query.iter(&world).count(), 1);
        }

        schedule.run(&mut world);
        assert_eq!(query.iter(&world).count(), 0);
    }

    #[test]
    fn test_envelope_peaks_mid_life() {
        let (mut world, mut schedule) = explosion_world();
        let blast = world.spawn(ExplosionBundle::new(100.0, 100.0, 40.0, 30)).id();

        let mut radii = Vec::new();
        for _ in 0..29 {
            schedule.run(&mut world);
            radii.push(world.get::<Explosion>(blast).unwrap().current_radius());
        }

        let peak = radii.iter().cloned().fold(0.0f32, f32::max);
        assert!((peak - 40.0).abs() < 3.0);
        assert!(radii.first().unwrap() < &peak);
        assert!(radii.last().unwrap() < &peak);
    }

    #[test]
    fn test_lifetime_advance_never_damages() {
        let (mut world, mut schedule) = explosion_world();
        // A worm sitting inside the blast radius of a live explosion.
        let worm = world.spawn(WormBundle::new(0, 95.0, 95.0, 30.0)).id();
        world.spawn(ExplosionBundle::new(100.0, 100.0, 40.0, 30));

        for _ in 0..30 {
            schedule.run(&mut world);
        }

        assert_eq!(world.get::<Health>(worm).unwrap().current, 100.0);
        assert_eq!(world.get::<Velocity>(worm).unwrap().vy, 0.0);
    }
}
