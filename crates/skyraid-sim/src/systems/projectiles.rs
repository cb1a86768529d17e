//! Projectile pool: fire cooldown, straight-line motion and expiry.

use glam::Vec3;
use hecs::World;

use skyraid_core::components::{Lifecycle, Projectile};
use skyraid_core::config::ProjectileTuning;
use skyraid_core::ports::SceneSink;
use skyraid_core::types::{EntityId, Position, Velocity};

use crate::systems::lifecycle;
use crate::world_setup;

/// Time gate on the gun.
#[derive(Debug, Clone, Default)]
pub struct FireControl {
    /// Sim time of the last round fired; `None` until the first shot.
    last_fire_time: Option<f64>,
}

impl FireControl {
    /// Whether a round may leave the gun at `now`.
    pub fn ready(&self, now: f64, cooldown_secs: f32) -> bool {
        match self.last_fire_time {
            None => true,
            Some(last) => ((now - last) as f32) >= cooldown_secs,
        }
    }

    /// Fire one round if the cooldown has elapsed. Returns the new round's
    /// id, or `None` if the gun is still cycling.
    #[allow(clippy::too_many_arguments)]
    pub fn try_fire(
        &mut self,
        world: &mut World,
        scene: &mut dyn SceneSink,
        next_id: &mut u64,
        tuning: &ProjectileTuning,
        origin: Vec3,
        direction: Vec3,
        now: f64,
    ) -> Option<EntityId> {
        if !self.ready(now, tuning.cooldown_secs) {
            return None;
        }
        self.last_fire_time = Some(now);
        Some(world_setup::spawn_projectile(
            world, scene, next_id, tuning, origin, direction,
        ))
    }

    pub fn last_fire_time(&self) -> Option<f64> {
        self.last_fire_time
    }
}

/// Move every live round and expire the ones past their lifetime.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, (_projectile, life, pos, vel)) in
        world.query_mut::<(&Projectile, &mut Lifecycle, &mut Position, &Velocity)>()
    {
        if !life.alive {
            continue;
        }
        pos.0 += vel.0 * dt;
        lifecycle::advance(life, dt);
    }
}
