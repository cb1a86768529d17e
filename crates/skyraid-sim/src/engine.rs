//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the flight model, the camera
//! rig and the spawn policies. It processes player commands, runs all systems
//! and produces `FrameSnapshot`s. Completely headless, enabling deterministic
//! testing: the only randomness comes from one seeded rng and only shapes
//! cosmetic spawn parameters.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyraid_core::commands::{ControlSignal, PlayerCommand};
use skyraid_core::components::{Adversary, Explosion, Lifecycle, Projectile};
use skyraid_core::config::Tuning;
use skyraid_core::enums::{EntityKind, GamePhase};
use skyraid_core::events::AudioCue;
use skyraid_core::ports::{NullScene, SceneSink};
use skyraid_core::state::{FrameSnapshot, GameStats};
use skyraid_core::types::{EntityId, SimTime};

use crate::camera::CameraRig;
use crate::flight::FlightModel;
use crate::scoring::ScoreState;
use crate::systems;
use crate::systems::adversaries::AdversarySpawner;
use crate::systems::lifecycle;
use crate::systems::projectiles::FireControl;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    tuning: Tuning,
    next_entity_id: u64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_events: Vec<AudioCue>,
    score: ScoreState,
    flight: FlightModel,
    camera: CameraRig,
    fire_control: FireControl,
    spawner: AdversarySpawner,
    scene: Box<dyn SceneSink>,
}

impl SimulationEngine {
    /// Create a new simulation engine with no scene attached.
    pub fn new(config: SimConfig) -> Self {
        Self::with_scene(config, Box::new(NullScene))
    }

    /// Create a new simulation engine that reports visuals to `scene`.
    /// The adversary pool starts full.
    pub fn with_scene(config: SimConfig, scene: Box<dyn SceneSink>) -> Self {
        let tuning = config.tuning;
        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_entity_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            score: ScoreState::default(),
            flight: FlightModel::new(tuning.flight.clone(), tuning.smoothing),
            camera: CameraRig::new(tuning.camera.clone(), tuning.smoothing),
            fire_control: FireControl::default(),
            spawner: AdversarySpawner::default(),
            scene,
            tuning,
        };
        engine.populate();
        tracing::info!(
            seed = config.seed,
            adversaries = engine.live_count(EntityKind::Adversary),
            "simulation engine created"
        );
        engine
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds under `signal` and return the
    /// resulting snapshot. While paused only commands are processed.
    pub fn tick(&mut self, dt: f32, signal: ControlSignal) -> FrameSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
            self.time.advance(dt);
            self.score.advance_time(dt);
            self.run_systems(dt, &signal.clamped());
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        let snapshot = systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.score.stats(),
            self.flight.view(),
            self.camera.view(),
            audio_events,
        );
        self.scene.sync(&snapshot);
        tracing::trace!(
            tick = snapshot.time.tick,
            projectiles = snapshot.projectiles.len(),
            adversaries = snapshot.adversaries.len(),
            explosions = snapshot.explosions.len(),
            "tick"
        );
        snapshot
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn stats(&self) -> GameStats {
        self.score.stats()
    }

    pub fn flight(&self) -> &FlightModel {
        &self.flight
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn fire_control(&self) -> &FireControl {
        &self.fire_control
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Live entities of one kind.
    pub fn live_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Projectile => lifecycle::live_count::<Projectile>(&self.world),
            EntityKind::Adversary => lifecycle::live_count::<Adversary>(&self.world),
            EntityKind::Explosion => lifecycle::live_count::<Explosion>(&self.world),
        }
    }

    /// Move the aircraft, keeping its speed. For scripted scenarios.
    pub fn place_aircraft(&mut self, position: Vec3, pitch: f32, yaw: f32, roll: f32) {
        self.flight.set_pose(position, pitch, yaw, roll);
    }

    /// Spawn an adversary at a fixed point. For scripted scenarios; bypasses
    /// the spawn timer but not the visual bookkeeping.
    pub fn spawn_adversary_at(&mut self, position: Vec3) -> EntityId {
        world_setup::spawn_adversary_at(
            &mut self.world,
            self.scene.as_mut(),
            &mut self.rng,
            &mut self.next_entity_id,
            &self.tuning.adversary,
            position,
        )
    }

    /// Remove every entity of one kind, releasing visuals.
    pub fn clear_pool(&mut self, kind: EntityKind) {
        let scene = self.scene.as_mut();
        let buffer = &mut self.despawn_buffer;
        match kind {
            EntityKind::Projectile => {
                systems::cleanup::clear_pool::<Projectile>(&mut self.world, scene, buffer)
            }
            EntityKind::Adversary => {
                systems::cleanup::clear_pool::<Adversary>(&mut self.world, scene, buffer)
            }
            EntityKind::Explosion => {
                systems::cleanup::clear_pool::<Explosion>(&mut self.world, scene, buffer)
            }
        }
    }

    /// Destroy an entity outside the tick. It is retired immediately.
    /// Returns false if no live entity has that id.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        let Some(entity) = lifecycle::find(&self.world, id) else {
            return false;
        };
        let was_alive = match self.world.get::<&mut Lifecycle>(entity) {
            Ok(mut life) => lifecycle::destroy(&mut life),
            Err(_) => false,
        };
        systems::cleanup::run(
            &mut self.world,
            self.scene.as_mut(),
            &mut self.despawn_buffer,
        );
        was_alive
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::ToggleCamera => {
                let mode = self.camera.toggle_mode();
                tracing::debug!(?mode, "camera mode toggled");
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                    tracing::info!(tick = self.time.tick, "paused");
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                    tracing::info!(tick = self.time.tick, "resumed");
                }
            }
            PlayerCommand::Restart => self.restart(),
        }
    }

    /// Tear down every pool and start a new sortie. The rng stream carries
    /// on, so a restarted run differs from the first one.
    fn restart(&mut self) {
        for kind in [
            EntityKind::Projectile,
            EntityKind::Adversary,
            EntityKind::Explosion,
        ] {
            self.clear_pool(kind);
        }
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
        self.score = ScoreState::default();
        self.flight = FlightModel::new(self.tuning.flight.clone(), self.tuning.smoothing);
        self.camera = CameraRig::new(self.tuning.camera.clone(), self.tuning.smoothing);
        self.fire_control = FireControl::default();
        self.spawner = AdversarySpawner::default();
        self.audio_events.clear();
        self.populate();
        tracing::info!("sortie restarted");
    }

    fn populate(&mut self) {
        world_setup::prespawn_adversaries(
            &mut self.world,
            self.scene.as_mut(),
            &mut self.rng,
            &mut self.next_entity_id,
            &self.tuning.adversary,
            self.tuning.world.city_radius,
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32, signal: &ControlSignal) {
        // 1. Gun, from the pose at the start of the frame
        if signal.fire {
            let fired = self.fire_control.try_fire(
                &mut self.world,
                self.scene.as_mut(),
                &mut self.next_entity_id,
                &self.tuning.projectile,
                self.flight.fire_origin(),
                self.flight.forward(),
                self.time.elapsed_secs,
            );
            if fired.is_some() {
                self.score.record_shot();
                self.audio_events.push(AudioCue::Shoot);
            }
        }
        // 2. Flight
        self.flight.step(dt, signal);
        // 3. Adversary upkeep and hover
        self.spawner.run(
            &mut self.world,
            self.scene.as_mut(),
            &mut self.rng,
            &mut self.next_entity_id,
            &self.tuning.adversary,
            self.tuning.world.city_radius,
            dt,
        );
        systems::adversaries::run(&mut self.world, dt);
        // 4. Rounds in flight
        systems::projectiles::run(&mut self.world, dt);
        // 5. Explosions
        systems::explosions::run(
            &mut self.world,
            &self.tuning.explosion,
            self.tuning.smoothing,
            dt,
        );
        // 6. Collision and scoring
        systems::collision::run(
            &mut self.world,
            self.scene.as_mut(),
            &mut self.rng,
            &mut self.next_entity_id,
            &self.tuning.collision,
            &self.tuning.explosion,
            &mut self.score,
            &mut self.audio_events,
        );
        // 7. Cleanup (expired, destroyed)
        systems::cleanup::run(
            &mut self.world,
            self.scene.as_mut(),
            &mut self.despawn_buffer,
        );
        // 8. Camera follows the final pose
        self.camera
            .update(self.flight.position(), self.flight.orientation(), dt);
    }
}
