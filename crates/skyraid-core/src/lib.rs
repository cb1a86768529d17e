//! Core types and definitions for the SKYRAID simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshot views, audio cues, constants, runtime
//! tuning and the traits the simulation uses to talk to its collaborators.
//! It has no dependency on a renderer or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod ports;
pub mod state;
pub mod types;
