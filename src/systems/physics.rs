//! Gravity and terrain collision resolution for grounded bodies.
//!
//! Worms and supply crates fall under gravity and come to rest on the
//! terrain surface. Penetration is resolved by retracting the body upward
//! in 1-unit steps until its rectangle clears the solid cells (bounded by a
//! configured step cap), then zeroing vertical velocity. Horizontal
//! velocity is never integrated here: worms move horizontally only through
//! explicit commands, and knockback `vx` is left as state for external
//! consumers.

use crate::components::*;
use crate::config::SimConfig;
use crate::terrain::TerrainGrid;
use bevy_ecs::prelude::*;

/// Single retraction step, in world units.
const UNSTICK_STEP: f32 = 1.0;

/// System that applies gravity and resolves terrain penetration for every
/// non-projectile body. Projectiles integrate in their own system, with
/// wind.
pub fn body_physics_system(
    config: Res<SimConfig>,
    terrain: Res<TerrainGrid>,
    mut bodies: Query<(&mut Position, &mut Velocity, &Extent), Without<ProjectileId>>,
) {
    for (mut pos, mut vel, extent) in bodies.iter_mut() {
        vel.vy += config.gravity;
        pos.y += vel.vy;

        if terrain.intersects(&extent.rect_at(&pos)) {
            let mut steps = 0;
            while steps < config.max_unstick_steps && terrain.intersects(&extent.rect_at(&pos)) {
                pos.y -= UNSTICK_STEP;
                steps += 1;
            }
            vel.vy = 0.0;
        }
    }
}
