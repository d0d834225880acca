//! Simulation tuning.
//!
//! All units are world units and ticks: velocities are units per tick,
//! accelerations units per tick squared. One tick is one fixed step of the
//! whole simulation; there is no variable-delta path.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Every tunable of the simulation, inserted as a resource at session
/// construction.
#[derive(Resource, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimConfig {
    /// Play area width in world units.
    pub world_width: f32,
    /// Play area height in world units.
    pub world_height: f32,
    /// Terrain cell size in world units.
    pub cell_size: f32,
    /// Added to every falling body's `vy` each tick. Uncapped.
    pub gravity: f32,
    /// Lateral drift added to projectile `vx` each tick.
    pub wind: f32,
    /// Worm body extent (square).
    pub worm_size: f32,
    /// Projectile body extent (square).
    pub projectile_size: f32,
    /// Supply crate extent (square).
    pub crate_size: f32,
    /// Damage at the center of a blast, before falloff.
    pub base_damage: f32,
    /// Knockback speed at the center of a blast, before falloff.
    pub knockback_scale: f32,
    /// Extra upward velocity added to every knocked-back worm.
    pub knockback_lift: f32,
    /// Vertical impulse applied by a jump command (negative is up).
    pub jump_impulse: f32,
    /// Upper bound on 1-unit retraction steps when resolving terrain
    /// penetration. A body still embedded at the cap stays put, with zero
    /// vertical velocity.
    pub max_unstick_steps: u32,
    /// Damage radius as a multiple of the carve radius. 1.0 couples the
    /// damaged area to the destroyed area exactly.
    pub damage_radius_scale: f32,
    /// Explosion effect lifetime in ticks.
    pub explosion_duration: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            cell_size: 10.0,
            gravity: 0.2,
            wind: 0.03,
            worm_size: 30.0,
            projectile_size: 8.0,
            crate_size: 14.0,
            base_damage: 30.0,
            knockback_scale: 5.0,
            knockback_lift: 2.0,
            jump_impulse: -6.0,
            max_unstick_steps: 64,
            damage_radius_scale: 1.0,
            explosion_duration: 30,
        }
    }
}
