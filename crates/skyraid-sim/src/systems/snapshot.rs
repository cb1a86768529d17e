//! Snapshot system: queries the ECS world and builds a complete FrameSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use skyraid_core::components::*;
use skyraid_core::enums::GamePhase;
use skyraid_core::events::AudioCue;
use skyraid_core::state::*;
use skyraid_core::types::{Position, SimTime, Velocity};

use crate::systems::lifecycle;

/// Build a complete FrameSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    stats: GameStats,
    aircraft: AircraftView,
    camera: CameraView,
    audio_events: Vec<AudioCue>,
) -> FrameSnapshot {
    FrameSnapshot {
        time: *time,
        phase,
        stats,
        aircraft,
        camera,
        projectiles: build_projectiles(world),
        adversaries: build_adversaries(world),
        explosions: build_explosions(world),
        audio_events,
    }
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&Projectile, &Lifecycle, &Position, &Velocity)>()
        .iter()
        .filter(|(_, (_, life, _, _))| life.alive)
        .map(|(_, (_, life, pos, vel))| ProjectileView {
            id: life.id,
            position: pos.0,
            velocity: vel.0,
            age: life.age as f32,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_adversaries(world: &World) -> Vec<AdversaryView> {
    let mut views: Vec<AdversaryView> = world
        .query::<(&Adversary, &Lifecycle, &Position, &HoverMotion)>()
        .iter()
        .filter(|(_, (_, life, _, _))| life.alive)
        .map(|(_, (_, life, pos, hover))| AdversaryView {
            id: life.id,
            position: pos.0,
            heading: hover.heading,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    let mut views: Vec<ExplosionView> = world
        .query::<(&Explosion, &Lifecycle, &Position, &ExplosionBurst)>()
        .iter()
        .filter(|(_, (_, life, _, _))| life.alive)
        .map(|(_, (_, life, pos, burst))| ExplosionView {
            id: life.id,
            position: pos.0,
            size: burst.size,
            progress: lifecycle::progress(life),
            particles: burst.particles.clone(),
            flash: burst.flash,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}
