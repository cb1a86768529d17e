//! Collision and scoring: rounds against adversaries.
//!
//! Broad phase is a world-space AABB overlap, narrow phase a center distance
//! check. Rounds and adversaries are both visited in spawn order; each round
//! scores at most one hit and each adversary can be claimed only once per
//! frame, so the resolved hit set is fully determined by spawn order.

use glam::Vec3;
use hecs::{Component, World};
use rand_chacha::ChaCha8Rng;

use skyraid_core::components::{Adversary, Lifecycle, LocalBounds, Projectile};
use skyraid_core::config::{CollisionTuning, ExplosionTuning};
use skyraid_core::events::AudioCue;
use skyraid_core::ports::SceneSink;
use skyraid_core::types::{Aabb, EntityId, Position};

use crate::scoring::ScoreState;
use crate::systems::lifecycle;
use crate::world_setup;

/// A resolved projectile/adversary pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub projectile: EntityId,
    pub adversary: EntityId,
    /// Adversary position at the moment of impact.
    pub position: Vec3,
}

struct Body {
    id: EntityId,
    position: Vec3,
    bounds: Aabb,
}

fn live_bodies<T: Component>(world: &World) -> Vec<Body> {
    let mut bodies: Vec<Body> = world
        .query::<(&T, &Lifecycle, &Position, &LocalBounds)>()
        .iter()
        .filter(|(_, (_, life, _, _))| life.alive)
        .map(|(_, (_, life, pos, local))| Body {
            id: life.id,
            position: pos.0,
            bounds: Aabb::new(local.min, local.max).translated(pos.0),
        })
        .collect();
    bodies.sort_by_key(|b| b.id);
    bodies
}

/// Pair up rounds and adversaries that collide this frame. Read-only.
pub fn find_hits(world: &World, hit_radius: f32) -> Vec<Hit> {
    let projectiles = live_bodies::<Projectile>(world);
    let adversaries = live_bodies::<Adversary>(world);
    let mut claimed = vec![false; adversaries.len()];
    let mut hits = Vec::new();

    for round in &projectiles {
        for (index, target) in adversaries.iter().enumerate() {
            if claimed[index] || !round.bounds.intersects(&target.bounds) {
                continue;
            }
            if round.position.distance(target.position) < hit_radius {
                claimed[index] = true;
                hits.push(Hit {
                    projectile: round.id,
                    adversary: target.id,
                    position: target.position,
                });
                break;
            }
        }
    }
    hits
}

/// Detect and resolve every hit this frame: both entities die, an explosion
/// spawns at the adversary, the score is credited and the cues are raised.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    scene: &mut dyn SceneSink,
    rng: &mut ChaCha8Rng,
    next_id: &mut u64,
    collision: &CollisionTuning,
    explosion: &ExplosionTuning,
    score: &mut ScoreState,
    audio_events: &mut Vec<AudioCue>,
) -> Vec<Hit> {
    let hits = find_hits(world, collision.hit_radius);

    for hit in &hits {
        for id in [hit.projectile, hit.adversary] {
            if let Some(entity) = lifecycle::find(world, id) {
                if let Ok(mut life) = world.get::<&mut Lifecycle>(entity) {
                    lifecycle::destroy(&mut life);
                }
            }
        }

        world_setup::spawn_explosion(
            world,
            scene,
            rng,
            next_id,
            explosion,
            hit.position,
            collision.explosion_size,
        );
        audio_events.push(AudioCue::Explosion);
        audio_events.push(AudioCue::Hit);
        score.record_hit(collision.points_per_kill);

        tracing::debug!(
            projectile = hit.projectile.0,
            adversary = hit.adversary.0,
            score = score.score,
            "adversary destroyed"
        );
    }
    hits
}
