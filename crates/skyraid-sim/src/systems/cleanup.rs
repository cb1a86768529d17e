//! Cleanup system: retires dead entities and releases their visuals.

use hecs::{Component, Entity, World};

use skyraid_core::components::{Lifecycle, Visual};
use skyraid_core::ports::SceneSink;

/// Despawn every dead entity, detaching its visual first. Uses a
/// pre-allocated buffer to avoid per-tick allocation. Returns how many
/// entities were removed.
pub fn run(world: &mut World, scene: &mut dyn SceneSink, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, (life, visual)) in world.query_mut::<(&Lifecycle, &mut Visual)>() {
        if !life.alive {
            tracing::debug!(id = life.id.0, age = life.age, "retired");
            if let Some(handle) = visual.handle.take() {
                scene.detach(handle);
            }
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}

/// Despawn every entity carrying marker `T`, alive or not.
pub fn clear_pool<T: Component>(
    world: &mut World,
    scene: &mut dyn SceneSink,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, (_marker, visual)) in world.query_mut::<(&T, &mut Visual)>() {
        if let Some(handle) = visual.handle.take() {
            scene.detach(handle);
        }
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
