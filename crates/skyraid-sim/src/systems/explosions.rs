//! Explosion effect animation. Purely cosmetic.

use hecs::World;

use skyraid_core::components::{Explosion, ExplosionBurst, Lifecycle};
use skyraid_core::config::ExplosionTuning;
use skyraid_core::constants::{FLASH_FADE_SPEEDUP, FLASH_GROWTH, FLASH_INITIAL_OPACITY};
use skyraid_core::enums::SmoothingMode;

use crate::smoothing;
use crate::systems::lifecycle;

/// Drift, fall and fade every running explosion.
pub fn run(world: &mut World, tuning: &ExplosionTuning, mode: SmoothingMode, dt: f32) {
    // Drag is tuned as the velocity kept per nominal frame.
    let retained = 1.0 - smoothing::frame_factor(mode, 1.0 - tuning.drag, dt);

    for (_entity, (_explosion, life, burst)) in
        world.query_mut::<(&Explosion, &mut Lifecycle, &mut ExplosionBurst)>()
    {
        if !life.alive {
            continue;
        }
        lifecycle::advance(life, dt);
        let progress = lifecycle::progress(life);

        for particle in &mut burst.particles {
            particle.offset += particle.velocity * dt;
            particle.velocity.y -= tuning.gravity * dt;
            particle.velocity *= retained;
            particle.scale = 1.0 - progress;
            particle.opacity = 1.0 - progress;
        }

        let flash = (progress * FLASH_FADE_SPEEDUP).min(1.0);
        burst.flash.opacity = FLASH_INITIAL_OPACITY * (1.0 - flash);
        burst.flash.scale = 1.0 + FLASH_GROWTH * flash;
    }
}
