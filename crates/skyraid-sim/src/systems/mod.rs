//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! Spawn policy state that outlives a tick (fire cooldown, spawn timer)
//! lives in small structs owned by the engine.

pub mod adversaries;
pub mod cleanup;
pub mod collision;
pub mod explosions;
pub mod lifecycle;
pub mod projectiles;
pub mod snapshot;
