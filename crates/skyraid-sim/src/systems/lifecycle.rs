//! Shared age/expiry bookkeeping for every pooled entity kind.

use hecs::{Component, Entity, World};

use skyraid_core::components::Lifecycle;
use skyraid_core::types::EntityId;

/// Frame times arrive as f32; their rounding must not push expiry a frame late.
const EXPIRY_TOLERANCE: f64 = 1e-6;

/// Age an entity by `dt` and expire it once it reaches its lifetime.
pub fn advance(life: &mut Lifecycle, dt: f32) {
    life.age += f64::from(dt);
    if let Some(max) = life.max_lifetime {
        if life.age >= f64::from(max) - EXPIRY_TOLERANCE {
            life.alive = false;
        }
    }
}

/// Mark an entity dead. Returns false if it already was.
pub fn destroy(life: &mut Lifecycle) -> bool {
    std::mem::replace(&mut life.alive, false)
}

/// Fraction of the lifetime elapsed, clamped to [0, 1]. Entities without a
/// lifetime report 0.
pub fn progress(life: &Lifecycle) -> f32 {
    match life.max_lifetime {
        Some(max) if max > 0.0 => ((life.age / f64::from(max)) as f32).clamp(0.0, 1.0),
        Some(_) => 1.0,
        None => 0.0,
    }
}

/// Number of live entities carrying marker `T`.
pub fn live_count<T: Component>(world: &World) -> usize {
    world
        .query::<(&T, &Lifecycle)>()
        .iter()
        .filter(|(_, (_, life))| life.alive)
        .count()
}

/// Find the ECS entity for an id.
pub fn find(world: &World, id: EntityId) -> Option<Entity> {
    world
        .query::<&Lifecycle>()
        .iter()
        .find(|(_, life)| life.id == id)
        .map(|(entity, _)| entity)
}
