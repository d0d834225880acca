//! Projectile ballistics and impact resolution.
//!
//! Shells fly under gravity and wind and collide only with terrain, never
//! with worms directly. An impact carves the terrain, damages and knocks
//! back living worms, and spawns the explosion effect - all derived from
//! one center/radius pair, applied in full before the next shell is
//! processed. Shells that leave the play area disappear without a trace.

use crate::components::*;
use crate::config::SimConfig;
use crate::terrain::TerrainGrid;
use bevy_ecs::prelude::*;

type WormQuery<'w, 's> = Query<
    'w,
    's,
    (&'static Position, &'static Extent, &'static mut Velocity, &'static mut Health),
    (With<WormId>, Without<ProjectileId>),
>;

/// System that advances every live shell by one tick, in creation order.
pub fn projectile_system(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut terrain: ResMut<TerrainGrid>,
    mut projectiles: Query<(Entity, &ProjectileId, &mut Position, &mut Velocity, &Extent, &Projectile)>,
    mut worms: WormQuery,
) {
    // Impacts must resolve in creation order, which ECS iteration order
    // does not guarantee.
    let mut order: Vec<(ProjectileId, Entity)> = projectiles
        .iter()
        .map(|(entity, id, ..)| (*id, entity))
        .collect();
    order.sort_unstable_by_key(|(id, _)| *id);

    for (_, entity) in order {
        let Ok((_, _, mut pos, mut vel, extent, shell)) = projectiles.get_mut(entity) else {
            continue;
        };

        vel.vy += config.gravity;
        vel.vx += config.wind;
        pos.x += vel.vx;
        pos.y += vel.vy;

        // Bounds exit: no explosion, no terrain change.
        if pos.x < 0.0 || pos.x > config.world_width || pos.y < 0.0 || pos.y > config.world_height {
            commands.entity(entity).despawn();
            continue;
        }

        if terrain.intersects(&extent.rect_at(&pos)) {
            let (cx, cy) = extent.center_at(&pos);
            let radius = shell.weapon.blast().radius();

            terrain.carve(cx, cy, radius);
            apply_blast(&config, cx, cy, radius, &mut worms);
            commands.spawn(ExplosionBundle::new(cx, cy, radius, config.explosion_duration));
            commands.entity(entity).despawn();
        }
    }
}

/// Damage/knockback pass for one impact, against every living worm. The
/// damage radius is the carve radius scaled by `damage_radius_scale`
/// (equal radii by default).
fn apply_blast(config: &SimConfig, center_x: f32, center_y: f32, carve_radius: f32, worms: &mut WormQuery) {
    let damage_radius = carve_radius * config.damage_radius_scale;
    if damage_radius <= 0.0 {
        return;
    }

    for (pos, extent, mut vel, mut health) in worms.iter_mut() {
        if !health.is_alive() {
            continue;
        }

        let (wx, wy) = extent.center_at(pos);
        let dx = wx - center_x;
        let dy = wy - center_y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist >= damage_radius {
            continue;
        }

        let falloff = 1.0 - dist / damage_radius;
        health.damage((config.base_damage * falloff).round());

        // A blast centered exactly on the worm has no direction; toss it
        // straight up instead of dividing by zero.
        let (dir_x, dir_y) = if dist == 0.0 {
            (0.0, -1.0)
        } else {
            (dx / dist, dy / dist)
        };
        let knockback = config.knockback_scale * falloff;
        vel.vx += dir_x * knockback;
        vel.vy += dir_y * knockback - config.knockback_lift;
    }
}
