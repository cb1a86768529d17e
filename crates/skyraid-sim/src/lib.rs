//! Simulation engine for SKYRAID.
//!
//! Owns the hecs ECS world, steps the flight model and the entity pools once
//! per frame, and produces FrameSnapshots for the renderer and HUD.

pub mod camera;
pub mod engine;
pub mod flight;
pub mod scoring;
pub mod smoothing;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use skyraid_core as core;

#[cfg(test)]
mod tests;
