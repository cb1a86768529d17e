//! Adversary pool: population upkeep and hover motion.

use std::f32::consts::TAU;

use hecs::World;
use rand_chacha::ChaCha8Rng;

use skyraid_core::components::{Adversary, HoverMotion, Lifecycle};
use skyraid_core::config::AdversaryTuning;
use skyraid_core::constants::{
    ADVERSARY_SWAY_X_AMP, ADVERSARY_SWAY_X_FREQ, ADVERSARY_SWAY_Z_AMP, ADVERSARY_SWAY_Z_FREQ,
};
use skyraid_core::ports::SceneSink;
use skyraid_core::types::{EntityId, Position};

use crate::systems::lifecycle;
use crate::world_setup;

/// Keeps the adversary population topped up, one spawn per interval.
#[derive(Debug, Clone, Default)]
pub struct AdversarySpawner {
    timer: f32,
}

impl AdversarySpawner {
    /// Advance the spawn timer. When the interval elapses the timer resets,
    /// and one adversary spawns if the pool is below its target.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &mut self,
        world: &mut World,
        scene: &mut dyn SceneSink,
        rng: &mut ChaCha8Rng,
        next_id: &mut u64,
        tuning: &AdversaryTuning,
        city_radius: f32,
        dt: f32,
    ) -> Option<EntityId> {
        self.timer += dt;
        if self.timer < tuning.spawn_interval_secs {
            return None;
        }
        self.timer = 0.0;

        if lifecycle::live_count::<Adversary>(world) >= tuning.target_population {
            return None;
        }
        Some(world_setup::spawn_adversary(
            world,
            scene,
            rng,
            next_id,
            tuning,
            city_radius,
        ))
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }
}

/// Bob, sway and spin every live adversary.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (_adversary, life, pos, hover)) in
        world.query_mut::<(&Adversary, &mut Lifecycle, &mut Position, &mut HoverMotion)>()
    {
        if !life.alive {
            continue;
        }
        hover.phase += dt * hover.hover_speed;
        pos.0.y += hover.phase.sin() * hover.hover_height * dt;
        pos.0.x += (hover.phase * ADVERSARY_SWAY_X_FREQ).sin() * ADVERSARY_SWAY_X_AMP * dt;
        pos.0.z += (hover.phase * ADVERSARY_SWAY_Z_FREQ).cos() * ADVERSARY_SWAY_Z_AMP * dt;
        hover.heading = (hover.heading + hover.spin_rate * dt).rem_euclid(TAU);
        lifecycle::advance(life, dt);
    }
}
