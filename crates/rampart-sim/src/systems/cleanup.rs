//! Cleanup system: removes dead enemies and expired projectiles.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Projectile};

/// Despawn every entity whose alive flag is cleared.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, enemy) in world.query_mut::<&Enemy>() {
        if !enemy.alive {
            despawn_buffer.push(entity);
        }
    }

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if !projectile.alive {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
