//! SKYRAID headless application.
//!
//! This crate wires the simulation to its collaborators: the frame driver,
//! a fixed-rate game loop thread, scripted controls and logging sinks.

pub mod autopilot;
pub mod driver;
pub mod game_loop;
pub mod logging;
pub mod sinks;
pub mod state;

pub use skyraid_core as core;
