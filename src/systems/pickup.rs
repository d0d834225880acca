//! Supply crate pickup - worms consume crates their rectangle overlaps.

use crate::components::*;
use bevy_ecs::prelude::*;

/// System that lets the first living worm overlapping a crate consume it.
pub fn pickup_system(
    mut commands: Commands,
    crates: Query<(Entity, &Position, &Extent, &Collectable)>,
    mut worms: Query<(&Position, &Extent, &mut Health, &mut Ammo), With<WormId>>,
) {
    for (entity, crate_pos, crate_extent, collectable) in crates.iter() {
        let crate_rect = crate_extent.rect_at(crate_pos);
        let mut consumed = false;

        for (pos, extent, mut health, mut ammo) in worms.iter_mut() {
            if !health.is_alive() || !extent.rect_at(pos).overlaps(&crate_rect) {
                continue;
            }
            match collectable.kind {
                CollectableKind::Health => health.heal(collectable.value as f32),
                CollectableKind::Ammo => ammo.rounds += collectable.value,
            }
            consumed = true;
            break;
        }

        if consumed {
            commands.entity(entity).despawn();
        }
    }
}
