//! Tests for the simulation engine, entity pools, collision and scoring.

use glam::Vec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyraid_core::commands::{ControlSignal, PlayerCommand};
use skyraid_core::components::{ExplosionBurst, Lifecycle, LocalBounds};
use skyraid_core::config::{AdversaryTuning, ExplosionTuning, ProjectileTuning, Tuning};
use skyraid_core::constants::*;
use skyraid_core::enums::*;
use skyraid_core::events::AudioCue;
use skyraid_core::ports::NullScene;

use crate::engine::{SimConfig, SimulationEngine};
use crate::systems::{collision, explosions, lifecycle, projectiles::FireControl};
use crate::world_setup;

fn fire() -> ControlSignal {
    ControlSignal {
        fire: true,
        ..ControlSignal::NEUTRAL
    }
}

/// Engine with an empty sky and the aircraft level at (0, 20, -10), nose +Z.
fn range_engine() -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.clear_pool(EntityKind::Adversary);
    engine.place_aircraft(Vec3::new(0.0, 20.0, -10.0), 0.0, 0.0, 0.0);
    engine
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    for i in 0..600 {
        let signal = ControlSignal {
            pitch: ((i as f32) * 0.01).sin(),
            roll: ((i as f32) * 0.02).cos(),
            throttle: if i % 200 < 100 { 1.0 } else { -1.0 },
            fire: i % 3 == 0,
        };
        let snap_a = engine_a.tick(DT, signal);
        let snap_b = engine_b.tick(DT, signal);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    // Adversary spawn points come from the rng, so the first frame differs.
    let snap_a = engine_a.tick(DT, ControlSignal::NEUTRAL);
    let snap_b = engine_b.tick(DT, ControlSignal::NEUTRAL);
    assert_ne!(
        serde_json::to_string(&snap_a.adversaries).unwrap(),
        serde_json::to_string(&snap_b.adversaries).unwrap(),
        "Different seeds should place adversaries differently"
    );
    // The aircraft does not depend on the rng.
    assert_eq!(snap_a.aircraft.position, snap_b.aircraft.position);
}

// ---- Startup ----

#[test]
fn test_initial_state() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert_eq!(engine.live_count(EntityKind::Adversary), 8);
    assert_eq!(engine.live_count(EntityKind::Projectile), 0);
    assert_eq!(engine.phase(), GamePhase::Active);

    let snap = engine.tick(DT, ControlSignal::NEUTRAL);
    assert_eq!(snap.time.tick, 1);
    assert_eq!(snap.adversaries.len(), 8);
    assert_eq!(snap.stats, engine.stats());
    assert!(snap.audio_events.is_empty());
    for pair in snap.adversaries.windows(2) {
        assert!(pair[0].id < pair[1].id, "Adversaries should be in spawn order");
    }
    for adversary in &snap.adversaries {
        let p = adversary.position;
        assert!(p.x.abs() <= 32.5 && p.z.abs() <= 32.5, "Spawned outside area: {p:?}");
        assert!((14.5..=35.5).contains(&p.y), "Spawned outside altitude band: {p:?}");
    }
}

#[test]
fn test_spawn_area_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let tuning = AdversaryTuning::default();
    for _ in 0..1_000 {
        let p = world_setup::random_adversary_position(&mut rng, &tuning, CITY_RADIUS);
        assert!(p.x.abs() <= 32.0 && p.z.abs() <= 32.0, "{p:?}");
        assert!((15.0..=35.0).contains(&p.y), "{p:?}");
    }
}

// ---- Projectiles ----

#[test]
fn test_fire_control_rate_limit() {
    let mut world = World::new();
    let mut scene = NullScene;
    let mut next_id = 0;
    let tuning = ProjectileTuning::default();
    let mut gun = FireControl::default();

    let mut shoot = |gun: &mut FireControl, now: f64| {
        gun.try_fire(
            &mut world,
            &mut scene,
            &mut next_id,
            &tuning,
            Vec3::ZERO,
            Vec3::Z,
            now,
        )
    };

    assert!(shoot(&mut gun, 0.0).is_some(), "First shot is always allowed");
    assert!(shoot(&mut gun, 0.1).is_none(), "0.1s after is too soon");
    assert!(shoot(&mut gun, 0.2).is_some(), "0.2s after is allowed");
    assert!(shoot(&mut gun, 0.35).is_none());
    assert!(shoot(&mut gun, 0.5).is_some());
    assert_eq!(gun.last_fire_time(), Some(0.5));
}

#[test]
fn test_projectile_velocity_is_normalized() {
    let mut world = World::new();
    let mut next_id = 0;
    let id = world_setup::spawn_projectile(
        &mut world,
        &mut NullScene,
        &mut next_id,
        &ProjectileTuning::default(),
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, 7.0),
    );
    let entity = lifecycle::find(&world, id).unwrap();
    let velocity = world
        .get::<&skyraid_core::types::Velocity>(entity)
        .unwrap()
        .0;
    assert!((velocity - Vec3::new(0.0, 0.0, 100.0)).length() < 1e-4);
}

#[test]
fn test_held_trigger_respects_cooldown() {
    let mut engine = range_engine();
    let mut fired = Vec::new();
    // 0.125s frames: shots at 0.125, 0.375, 0.625.
    for _ in 0..6 {
        let snap = engine.tick(0.125, fire());
        fired.push(snap.audio_events.contains(&AudioCue::Shoot));
    }
    assert_eq!(fired, vec![true, false, true, false, true, false]);
    assert_eq!(engine.stats().shots, 3);
    assert_eq!(engine.live_count(EntityKind::Projectile), 3);
}

#[test]
fn test_projectile_expires_at_three_seconds() {
    let mut engine = range_engine();
    engine.tick(0.25, fire());
    assert_eq!(engine.live_count(EntityKind::Projectile), 1);

    // Age 0.25 after the firing frame; 10 more frames reach 2.75.
    for _ in 0..10 {
        engine.tick(0.25, ControlSignal::NEUTRAL);
    }
    let snap = engine.tick(0.0, ControlSignal::NEUTRAL);
    assert_eq!(snap.projectiles.len(), 1, "Still alive at age 2.75");
    assert!((snap.projectiles[0].age - 2.75).abs() < 1e-5);

    let snap = engine.tick(0.25, ControlSignal::NEUTRAL);
    assert!(snap.projectiles.is_empty(), "Removed at age 3.0");
    assert_eq!(engine.live_count(EntityKind::Projectile), 0);
}

#[test]
fn test_projectile_expiry_frame_at_sixty_hz() {
    let mut engine = range_engine();
    let dt = 1.0 / 60.0;
    engine.tick(dt, fire());
    for _ in 1..179 {
        engine.tick(dt, ControlSignal::NEUTRAL);
    }
    assert_eq!(
        engine.live_count(EntityKind::Projectile),
        1,
        "Alive after 179 frames"
    );
    engine.tick(dt, ControlSignal::NEUTRAL);
    assert_eq!(
        engine.live_count(EntityKind::Projectile),
        0,
        "Removed on frame 180"
    );
}

#[test]
fn test_projectile_bounds_follow_heading() {
    let mut world = World::new();
    let mut next_id = 0;
    let tuning = ProjectileTuning::default();
    let id = world_setup::spawn_projectile(
        &mut world,
        &mut NullScene,
        &mut next_id,
        &tuning,
        Vec3::ZERO,
        Vec3::NEG_Z,
    );
    let entity = lifecycle::find(&world, id).unwrap();
    let bounds = *world.get::<&LocalBounds>(entity).unwrap();
    // The tracer trails behind the round, which is now +Z.
    assert!((bounds.max.z + tuning.bounds_min.z).abs() < 1e-5, "{bounds:?}");
    assert!((bounds.min.z + tuning.bounds_max.z).abs() < 1e-5, "{bounds:?}");

    let id = world_setup::spawn_projectile(
        &mut world,
        &mut NullScene,
        &mut next_id,
        &tuning,
        Vec3::ZERO,
        Vec3::Y,
    );
    let entity = lifecycle::find(&world, id).unwrap();
    let bounds = *world.get::<&LocalBounds>(entity).unwrap();
    assert!((bounds.min.y - tuning.bounds_min.z).abs() < 1e-5, "{bounds:?}");
    assert!(bounds.max.z - bounds.min.z < 0.25, "{bounds:?}");
}

#[test]
fn test_projectile_flies_straight() {
    let mut engine = range_engine();
    let snap = engine.tick(0.125, fire());
    let round = snap.projectiles[0];
    // Spawned at the muzzle (0, 20, -7), then one frame of flight.
    assert!((round.position - Vec3::new(0.0, 20.0, 5.5)).length() < 1e-3);
    assert!((round.velocity - Vec3::new(0.0, 0.0, 100.0)).length() < 1e-3);
}

// ---- Adversaries ----

#[test]
fn test_population_recovers_within_one_interval() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick(0.25, ControlSignal::NEUTRAL);
    assert!(engine.destroy(snap.adversaries[3].id));
    assert_eq!(engine.live_count(EntityKind::Adversary), 7);

    let mut recovered_after = None;
    for frame in 1..=12 {
        engine.tick(0.25, ControlSignal::NEUTRAL);
        let count = engine.live_count(EntityKind::Adversary);
        assert!(count <= 8);
        if count == 8 {
            recovered_after = Some(frame);
            break;
        }
    }
    let frames = recovered_after.expect("Population should recover within 3s");
    assert!(frames as f32 * 0.25 <= ADVERSARY_SPAWN_INTERVAL_SECS);
}

#[test]
fn test_population_never_exceeds_target() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for i in 0..1_200 {
        let snap = engine.tick(0.05, ControlSignal::NEUTRAL);
        assert!(snap.adversaries.len() <= 8, "Overpopulated at frame {i}");
        if i % 97 == 0 {
            if let Some(first) = snap.adversaries.first() {
                engine.destroy(first.id);
            }
        }
    }
}

#[test]
fn test_adversary_has_no_auto_expiry() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let first = engine.tick(DT, ControlSignal::NEUTRAL).adversaries;
    for _ in 0..60 {
        engine.tick(1.0, ControlSignal::NEUTRAL);
    }
    let later = engine.tick(DT, ControlSignal::NEUTRAL).adversaries;
    let ids: Vec<_> = later.iter().map(|a| a.id).collect();
    for adversary in first {
        assert!(ids.contains(&adversary.id));
    }
}

#[test]
fn test_destroy_is_idempotent() {
    let mut engine = range_engine();
    let id = engine.spawn_adversary_at(Vec3::new(0.0, 20.0, 0.0));
    assert!(engine.destroy(id));
    assert!(!engine.destroy(id), "Already retired");
    assert_eq!(engine.live_count(EntityKind::Adversary), 0);
}

// ---- Collision & scoring ----

#[test]
fn test_end_to_end_hit() {
    let mut engine = range_engine();
    let target = engine.spawn_adversary_at(Vec3::new(0.0, 20.0, 0.0));

    let mut snap = engine.tick(DT, fire());
    assert_eq!(snap.audio_events, vec![AudioCue::Shoot]);
    let mut frames = 1;
    while snap.stats.hits == 0 && frames < 3 {
        snap = engine.tick(DT, ControlSignal::NEUTRAL);
        frames += 1;
    }

    assert_eq!(snap.stats.hits, 1, "Hit should resolve within 3 frames");
    assert!(frames as f32 * DT <= 0.1);
    assert_eq!(snap.audio_events, vec![AudioCue::Explosion, AudioCue::Hit]);
    assert!(snap.adversaries.iter().all(|a| a.id != target));
    assert!(snap.projectiles.is_empty());
    assert_eq!(snap.explosions.len(), 1);
    let explosion = &snap.explosions[0];
    assert!((explosion.position - Vec3::new(0.0, 20.0, 0.0)).length() < 0.5);
    assert_eq!(explosion.size, 1.5);

    assert_eq!(snap.stats.score, 100);
    assert_eq!(snap.stats.shots, 1);
    assert_eq!(snap.stats.accuracy, 100.0);
}

#[test]
fn test_first_match_wins_for_one_adversary() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut next_id = 0;
    let adversary_tuning = AdversaryTuning::default();
    let projectile_tuning = ProjectileTuning::default();

    let target = world_setup::spawn_adversary_at(
        &mut world,
        &mut NullScene,
        &mut rng,
        &mut next_id,
        &adversary_tuning,
        Vec3::new(0.0, 20.0, 0.0),
    );
    let first = world_setup::spawn_projectile(
        &mut world,
        &mut NullScene,
        &mut next_id,
        &projectile_tuning,
        Vec3::new(0.0, 20.0, 1.0),
        Vec3::Z,
    );
    let _second = world_setup::spawn_projectile(
        &mut world,
        &mut NullScene,
        &mut next_id,
        &projectile_tuning,
        Vec3::new(0.0, 20.0, -1.0),
        Vec3::Z,
    );

    let hits = collision::find_hits(&world, HIT_RADIUS);
    assert_eq!(hits.len(), 1, "One adversary can only be claimed once");
    assert_eq!(hits[0].projectile, first);
    assert_eq!(hits[0].adversary, target);
}

#[test]
fn test_one_round_scores_at_most_once() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut next_id = 0;
    let tuning = AdversaryTuning::default();

    let near = world_setup::spawn_adversary_at(
        &mut world,
        &mut NullScene,
        &mut rng,
        &mut next_id,
        &tuning,
        Vec3::new(1.0, 20.0, 0.0),
    );
    world_setup::spawn_adversary_at(
        &mut world,
        &mut NullScene,
        &mut rng,
        &mut next_id,
        &tuning,
        Vec3::new(-1.0, 20.0, 0.0),
    );
    world_setup::spawn_projectile(
        &mut world,
        &mut NullScene,
        &mut next_id,
        &ProjectileTuning::default(),
        Vec3::new(0.0, 20.0, 0.0),
        Vec3::Z,
    );

    let hits = collision::find_hits(&world, HIT_RADIUS);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].adversary, near, "Earliest-spawned adversary wins");
}

#[test]
fn test_broad_phase_gates_narrow_phase() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut next_id = 0;
    world_setup::spawn_adversary_at(
        &mut world,
        &mut NullScene,
        &mut rng,
        &mut next_id,
        &AdversaryTuning::default(),
        Vec3::new(0.0, 20.0, 0.0),
    );
    // Within the hit radius but below the adversary's bounding box.
    world_setup::spawn_projectile(
        &mut world,
        &mut NullScene,
        &mut next_id,
        &ProjectileTuning::default(),
        Vec3::new(0.0, 18.0, 0.0),
        Vec3::Z,
    );
    assert!(collision::find_hits(&world, HIT_RADIUS).is_empty());
}

#[test]
fn test_missed_round_halves_accuracy() {
    let mut engine = range_engine();
    engine.spawn_adversary_at(Vec3::new(0.0, 20.0, 0.0));
    engine.tick(DT, fire());
    for _ in 0..3 {
        engine.tick(DT, ControlSignal::NEUTRAL);
    }
    assert_eq!(engine.stats().hits, 1);

    // Second round flies through empty sky.
    engine.tick(0.25, fire());
    for _ in 0..3 {
        engine.tick(DT, ControlSignal::NEUTRAL);
    }
    let stats = engine.stats();
    assert_eq!(stats.shots, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.score, 100);
    assert!((stats.accuracy - 50.0).abs() < 1e-4);
}

// ---- Explosions ----

#[test]
fn test_explosion_particles_and_flash() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut next_id = 0;
    let tuning = ExplosionTuning::default();
    let id = world_setup::spawn_explosion(
        &mut world,
        &mut NullScene,
        &mut rng,
        &mut next_id,
        &tuning,
        Vec3::ZERO,
        1.5,
    );
    let entity = lifecycle::find(&world, id).unwrap();
    {
        let burst = world.get::<&ExplosionBurst>(entity).unwrap();
        assert!((15..=24).contains(&burst.particles.len()));
        assert!((burst.flash.radius - 4.5).abs() < 1e-6);
        assert!((burst.flash.opacity - 0.8).abs() < 1e-6);
    }

    explosions::run(&mut world, &tuning, SmoothingMode::Linear, 0.125);
    let burst = world.get::<&ExplosionBurst>(entity).unwrap();
    // Progress 1/16: flash at a quarter of its fade.
    assert!((burst.flash.opacity - 0.6).abs() < 1e-5);
    assert!((burst.flash.scale - 1.5).abs() < 1e-5);
    for particle in &burst.particles {
        assert!((particle.scale - 0.9375).abs() < 1e-5);
        assert!((particle.opacity - 0.9375).abs() < 1e-5);
    }
}

#[test]
fn test_explosion_expires_after_two_seconds() {
    let mut engine = range_engine();
    engine.spawn_adversary_at(Vec3::new(0.0, 20.0, 0.0));
    engine.tick(DT, fire());
    let mut snap = engine.tick(DT, ControlSignal::NEUTRAL);
    while snap.explosions.is_empty() {
        snap = engine.tick(DT, ControlSignal::NEUTRAL);
    }
    for _ in 0..7 {
        snap = engine.tick(0.25, ControlSignal::NEUTRAL);
    }
    assert_eq!(snap.explosions.len(), 1, "Alive at age 1.75");
    snap = engine.tick(0.25, ControlSignal::NEUTRAL);
    assert!(snap.explosions.is_empty(), "Gone at age 2.0");
}

// ---- Commands ----

#[test]
fn test_pause_freezes_time_and_pools() {
    let mut engine = range_engine();
    engine.tick(DT, fire());
    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick(DT, fire());
    assert_eq!(paused.phase, GamePhase::Paused);

    for _ in 0..30 {
        let snap = engine.tick(DT, fire());
        assert_eq!(snap.time.tick, paused.time.tick);
        assert_eq!(snap.aircraft.position, paused.aircraft.position);
        assert_eq!(snap.stats.shots, 1);
    }

    engine.queue_command(PlayerCommand::Resume);
    let resumed = engine.tick(DT, ControlSignal::NEUTRAL);
    assert_eq!(resumed.phase, GamePhase::Active);
    assert_eq!(resumed.time.tick, paused.time.tick + 1);
}

#[test]
fn test_toggle_camera() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::ToggleCamera);
    let snap = engine.tick(DT, ControlSignal::NEUTRAL);
    assert_eq!(snap.camera.mode, CameraMode::Free);
    // Free mode holds the camera still.
    let held = snap.camera.position;
    let snap = engine.tick(DT, ControlSignal::NEUTRAL);
    assert_eq!(snap.camera.position, held);
}

#[test]
fn test_restart_resets_sortie() {
    let mut engine = range_engine();
    engine.spawn_adversary_at(Vec3::new(0.0, 20.0, 0.0));
    engine.tick(DT, fire());
    for _ in 0..5 {
        engine.tick(DT, ControlSignal::NEUTRAL);
    }
    assert_eq!(engine.stats().score, 100);

    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick(DT, ControlSignal::NEUTRAL);
    assert_eq!(snap.stats.score, 0);
    assert_eq!(snap.stats.shots, 0);
    assert_eq!(snap.time.tick, 1);
    assert_eq!(snap.adversaries.len(), 8);
    assert!(snap.explosions.is_empty());
    assert!(snap.projectiles.is_empty());
    assert_eq!(engine.fire_control().last_fire_time(), None);
}

// ---- Robustness ----

#[test]
fn test_bad_frame_times_are_ignored() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let before = engine.tick(DT, ControlSignal::NEUTRAL);
    for dt in [f32::NAN, f32::INFINITY, -1.0] {
        let snap = engine.tick(dt, ControlSignal::NEUTRAL);
        assert_eq!(snap.aircraft.position, before.aircraft.position);
        assert!(snap.time.elapsed_secs.is_finite());
    }
}

#[test]
fn test_custom_tuning_flows_through() {
    let mut tuning = Tuning::default();
    tuning.adversary.target_population = 3;
    tuning.collision.points_per_kill = 250;
    let mut engine = SimulationEngine::new(SimConfig { seed: 9, tuning });
    assert_eq!(engine.live_count(EntityKind::Adversary), 3);

    engine.clear_pool(EntityKind::Adversary);
    engine.place_aircraft(Vec3::new(0.0, 20.0, -10.0), 0.0, 0.0, 0.0);
    engine.spawn_adversary_at(Vec3::new(0.0, 20.0, 0.0));
    engine.tick(DT, fire());
    for _ in 0..3 {
        engine.tick(DT, ControlSignal::NEUTRAL);
    }
    assert_eq!(engine.stats().score, 250);
}

#[test]
fn test_lifecycle_components_stay_consistent() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for i in 0..300 {
        engine.tick(DT, if i % 10 == 0 { fire() } else { ControlSignal::NEUTRAL });
        // Nothing dead survives a tick.
        let dead = engine
            .world()
            .query::<&Lifecycle>()
            .iter()
            .filter(|(_, life)| !life.alive)
            .count();
        assert_eq!(dead, 0, "Dead entity left in a pool at frame {i}");
    }
}
