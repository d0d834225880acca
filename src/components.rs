//! Components for the artillery duel simulation.
//!
//! Components are plain data containers attached to entities; all behavior
//! lives in the systems that query them.

use crate::terrain::Rect;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// BODY COMPONENTS
// ============================================================================

/// 2D position in world units. For worms, projectiles, and crates this is
/// the top-left corner of the body rectangle; for explosions it is the
/// blast center.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// 2D velocity in world units per tick.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f32,
    pub vy: f32,
}

impl Velocity {
    pub fn new(vx: f32, vy: f32) -> Self {
        Self { vx, vy }
    }
}

/// Fixed body extents. Together with `Position` this defines the
/// axis-aligned rectangle used by every terrain collision query.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Extent {
    pub w: f32,
    pub h: f32,
}

impl Extent {
    pub fn square(size: f32) -> Self {
        Self { w: size, h: size }
    }

    pub fn rect_at(&self, pos: &Position) -> Rect {
        Rect::new(pos.x, pos.y, self.w, self.h)
    }

    pub fn center_at(&self, pos: &Position) -> (f32, f32) {
        (pos.x + self.w / 2.0, pos.y + self.h / 2.0)
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::square(1.0)
    }
}

// ============================================================================
// WORM COMPONENTS
// ============================================================================

/// Unique identifier for a worm, assigned by the caller at spawn.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WormId(pub u32);

/// Hit points in `[0, max]`, clamped at zero. A worm at zero health is
/// inactive: it ignores commands and takes no further damage, but stays in
/// the world until the caller removes it.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Aim direction in radians: 0 points right, positive angles point down
/// (screen coordinates, y grows downward).
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Aim {
    pub angle: f32,
}

/// Rounds left. Fire commands are ignored when empty.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ammo {
    pub rounds: u32,
}

impl Ammo {
    pub fn new(rounds: u32) -> Self {
        Self { rounds }
    }

    /// Consume one round; false if there was none to spend.
    pub fn spend(&mut self) -> bool {
        if self.rounds > 0 {
            self.rounds -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for Ammo {
    fn default() -> Self {
        Self::new(10)
    }
}

// ============================================================================
// WEAPONS & PROJECTILES
// ============================================================================

/// Weapon selection. A closed set: kinds differ only in muzzle speed and
/// blast class, there is no per-kind dispatch beyond these tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Bazooka,
    Grenade,
    Shotgun,
    AirStrike,
    BaseballBat,
}

impl WeaponKind {
    pub fn blast(&self) -> BlastClass {
        match self {
            WeaponKind::Bazooka => BlastClass::Medium,
            WeaponKind::Grenade => BlastClass::Medium,
            WeaponKind::Shotgun => BlastClass::Small,
            WeaponKind::AirStrike => BlastClass::Large,
            WeaponKind::BaseballBat => BlastClass::Small,
        }
    }

    /// Initial shell speed in units per tick.
    pub fn muzzle_speed(&self) -> f32 {
        match self {
            WeaponKind::Bazooka => 8.0,
            WeaponKind::Grenade => 7.0,
            WeaponKind::Shotgun => 10.0,
            WeaponKind::AirStrike => 9.0,
            WeaponKind::BaseballBat => 6.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Bazooka => "Bazooka",
            WeaponKind::Grenade => "Grenade",
            WeaponKind::Shotgun => "Shotgun",
            WeaponKind::AirStrike => "AirStrike",
            WeaponKind::BaseballBat => "BaseballBat",
        }
    }
}

/// Blast size class shared by weapons and explosions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlastClass {
    Small,
    Medium,
    Large,
}

impl BlastClass {
    /// Maximum blast radius: carve radius and, scaled by configuration,
    /// damage radius.
    pub fn radius(&self) -> f32 {
        match self {
            BlastClass::Small => 20.0,
            BlastClass::Medium => 40.0,
            BlastClass::Large => 60.0,
        }
    }
}

/// Live shell in flight.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Projectile {
    pub weapon: WeaponKind,
}

/// Monotonically increasing projectile identifier. Impacts within one tick
/// resolve in this order.
#[derive(
    Component, Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
    Deserialize,
)]
pub struct ProjectileId(pub u32);

/// Allocator resource for `ProjectileId`.
#[derive(Resource, Debug, Default)]
pub struct ProjectileIds {
    counter: u32,
}

impl ProjectileIds {
    pub fn allocate(&mut self) -> ProjectileId {
        let id = ProjectileId(self.counter);
        self.counter += 1;
        id
    }
}

// ============================================================================
// EXPLOSIONS
// ============================================================================

/// Expanding-then-fading blast effect. Damage is applied once, when the
/// explosion is spawned; this component only tracks the visual lifetime.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub max_radius: f32,
    /// Lifetime in ticks.
    pub duration: u32,
    /// Ticks elapsed so far; never exceeds `duration`.
    pub frame: u32,
}

impl Explosion {
    pub fn new(max_radius: f32, duration: u32) -> Self {
        Self {
            max_radius,
            duration,
            frame: 0,
        }
    }

    /// Triangular envelope: grows linearly to `max_radius` at the midpoint
    /// of the lifetime, shrinks back to zero at the end.
    pub fn current_radius(&self) -> f32 {
        if self.duration == 0 {
            return 0.0;
        }
        let progress = self.frame as f32 / self.duration as f32;
        let envelope = if progress < 0.5 {
            progress * 2.0
        } else {
            (1.0 - progress) * 2.0
        };
        self.max_radius * envelope.max(0.0)
    }

    /// Elapsed fraction of the lifetime, in `[0, 1]`.
    pub fn lifetime_fraction(&self) -> f32 {
        if self.duration == 0 {
            1.0
        } else {
            (self.frame as f32 / self.duration as f32).clamp(0.0, 1.0)
        }
    }

    pub fn is_expired(&self) -> bool {
        self.frame >= self.duration
    }
}

impl Default for Explosion {
    fn default() -> Self {
        Self::new(BlastClass::Medium.radius(), 30)
    }
}

// ============================================================================
// COLLECTABLES
// ============================================================================

/// What a supply crate grants when picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectableKind {
    Health,
    Ammo,
}

impl CollectableKind {
    pub fn name(&self) -> &'static str {
        match self {
            CollectableKind::Health => "Health",
            CollectableKind::Ammo => "Ammo",
        }
    }
}

/// Supply crate contents. Crates fall and rest like worms do and are
/// consumed by the first living worm whose rectangle overlaps them.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collectable {
    pub kind: CollectableKind,
    pub value: u32,
}

impl Collectable {
    pub fn health(amount: u32) -> Self {
        Self {
            kind: CollectableKind::Health,
            value: amount,
        }
    }

    pub fn ammo(rounds: u32) -> Self {
        Self {
            kind: CollectableKind::Ammo,
            value: rounds,
        }
    }
}

impl Default for Collectable {
    fn default() -> Self {
        Self::health(25)
    }
}

// ============================================================================
// BUNDLE HELPERS
// ============================================================================

/// Bundle for spawning a complete worm.
#[derive(Bundle, Default)]
pub struct WormBundle {
    pub id: WormId,
    pub position: Position,
    pub velocity: Velocity,
    pub extent: Extent,
    pub health: Health,
    pub aim: Aim,
    pub ammo: Ammo,
}

impl WormBundle {
    pub fn new(id: u32, x: f32, y: f32, size: f32) -> Self {
        Self {
            id: WormId(id),
            position: Position::new(x, y),
            extent: Extent::square(size),
            ..Default::default()
        }
    }
}

/// Bundle for spawning a shell, centered on `(cx, cy)`.
#[derive(Bundle, Default)]
pub struct ProjectileBundle {
    pub id: ProjectileId,
    pub projectile: Projectile,
    pub position: Position,
    pub velocity: Velocity,
    pub extent: Extent,
}

impl ProjectileBundle {
    pub fn new(id: ProjectileId, weapon: WeaponKind, cx: f32, cy: f32, vx: f32, vy: f32, size: f32) -> Self {
        Self {
            id,
            projectile: Projectile { weapon },
            position: Position::new(cx - size / 2.0, cy - size / 2.0),
            velocity: Velocity::new(vx, vy),
            extent: Extent::square(size),
        }
    }
}

/// Bundle for spawning an explosion effect at a blast center.
#[derive(Bundle, Default)]
pub struct ExplosionBundle {
    pub position: Position,
    pub explosion: Explosion,
}

impl ExplosionBundle {
    pub fn new(center_x: f32, center_y: f32, max_radius: f32, duration: u32) -> Self {
        Self {
            position: Position::new(center_x, center_y),
            explosion: Explosion::new(max_radius, duration),
        }
    }
}

/// Bundle for spawning a supply crate.
#[derive(Bundle, Default)]
pub struct CollectableBundle {
    pub collectable: Collectable,
    pub position: Position,
    pub velocity: Velocity,
    pub extent: Extent,
}

impl CollectableBundle {
    pub fn new(collectable: Collectable, x: f32, y: f32, size: f32) -> Self {
        Self {
            collectable,
            position: Position::new(x, y),
            velocity: Velocity::default(),
            extent: Extent::square(size),
        }
    }
}
