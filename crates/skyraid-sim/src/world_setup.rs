//! Entity spawn factories for the pooled entity kinds.
//!
//! Every factory allocates the next `EntityId`, asks the scene for a visual
//! and spawns the component bundle for its kind.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyraid_core::components::*;
use skyraid_core::config::{AdversaryTuning, ExplosionTuning, ProjectileTuning};
use skyraid_core::constants::*;
use skyraid_core::enums::EntityKind;
use skyraid_core::ports::SceneSink;
use skyraid_core::types::{Aabb, EntityId, Position, Velocity};

/// Hand out the next id. Ids are never reused within an engine.
pub fn allocate_id(next_id: &mut u64) -> EntityId {
    let id = EntityId(*next_id);
    *next_id += 1;
    id
}

fn attach(scene: &mut dyn SceneSink, id: EntityId, kind: EntityKind, position: Vec3) -> Visual {
    Visual {
        handle: scene.attach(id, kind, position),
    }
}

/// Spawn a round at `origin` flying along `direction`.
pub fn spawn_projectile(
    world: &mut World,
    scene: &mut dyn SceneSink,
    next_id: &mut u64,
    tuning: &ProjectileTuning,
    origin: Vec3,
    direction: Vec3,
) -> EntityId {
    let id = allocate_id(next_id);
    let heading = direction.try_normalize().unwrap_or(Vec3::Z);
    let velocity = heading * tuning.speed;
    // The tracer trails behind local +Z; a round never turns, so its box is
    // oriented once here.
    let bounds = Aabb::new(tuning.bounds_min, tuning.bounds_max)
        .rotated(Quat::from_rotation_arc(Vec3::Z, heading));
    let visual = attach(scene, id, EntityKind::Projectile, origin);

    world.spawn((
        Projectile,
        Lifecycle {
            id,
            age: 0.0,
            max_lifetime: Some(tuning.lifetime_secs),
            alive: true,
        },
        Position(origin),
        Velocity(velocity),
        LocalBounds {
            min: bounds.min,
            max: bounds.max,
        },
        visual,
    ));
    tracing::debug!(id = id.0, ?origin, "projectile spawned");
    id
}

/// Random spawn point over the city: within the configured fraction of the
/// city radius horizontally, between the altitude limits vertically.
pub fn random_adversary_position(
    rng: &mut ChaCha8Rng,
    tuning: &AdversaryTuning,
    city_radius: f32,
) -> Vec3 {
    let extent = city_radius * 2.0 * tuning.spawn_area_fraction;
    let x = (rng.gen::<f32>() - 0.5) * extent;
    let z = (rng.gen::<f32>() - 0.5) * extent;
    let y = tuning.min_altitude + rng.gen::<f32>() * (tuning.max_altitude - tuning.min_altitude);
    Vec3::new(x, y, z)
}

/// Spawn an adversary at a random point over the city.
pub fn spawn_adversary(
    world: &mut World,
    scene: &mut dyn SceneSink,
    rng: &mut ChaCha8Rng,
    next_id: &mut u64,
    tuning: &AdversaryTuning,
    city_radius: f32,
) -> EntityId {
    let position = random_adversary_position(rng, tuning, city_radius);
    spawn_adversary_at(world, scene, rng, next_id, tuning, position)
}

/// Spawn an adversary at a fixed point. Hover parameters are still drawn
/// from the rng and fixed for the adversary's lifetime.
pub fn spawn_adversary_at(
    world: &mut World,
    scene: &mut dyn SceneSink,
    rng: &mut ChaCha8Rng,
    next_id: &mut u64,
    tuning: &AdversaryTuning,
    position: Vec3,
) -> EntityId {
    let id = allocate_id(next_id);
    let hover = HoverMotion {
        phase: rng.gen::<f32>() * TAU,
        hover_speed: lerp_range(rng, tuning.hover_speed_min, tuning.hover_speed_max),
        hover_height: lerp_range(rng, tuning.hover_height_min, tuning.hover_height_max),
        spin_rate: lerp_range(rng, tuning.spin_rate_min, tuning.spin_rate_max),
        heading: 0.0,
    };
    let visual = attach(scene, id, EntityKind::Adversary, position);

    world.spawn((
        Adversary,
        Lifecycle {
            id,
            age: 0.0,
            max_lifetime: None,
            alive: true,
        },
        Position(position),
        hover,
        LocalBounds {
            min: tuning.bounds_min,
            max: tuning.bounds_max,
        },
        visual,
    ));
    tracing::debug!(id = id.0, ?position, "adversary spawned");
    id
}

/// Fill the adversary pool up to its target population at once.
pub fn prespawn_adversaries(
    world: &mut World,
    scene: &mut dyn SceneSink,
    rng: &mut ChaCha8Rng,
    next_id: &mut u64,
    tuning: &AdversaryTuning,
    city_radius: f32,
) {
    for _ in 0..tuning.target_population {
        spawn_adversary(world, scene, rng, next_id, tuning, city_radius);
    }
}

/// Spawn an explosion of the given size.
pub fn spawn_explosion(
    world: &mut World,
    scene: &mut dyn SceneSink,
    rng: &mut ChaCha8Rng,
    next_id: &mut u64,
    tuning: &ExplosionTuning,
    position: Vec3,
    size: f32,
) -> EntityId {
    let id = allocate_id(next_id);
    let count = rng.gen_range(tuning.min_particles..=tuning.max_particles);
    let particles = (0..count).map(|_| random_particle(rng, size)).collect();
    let burst = ExplosionBurst {
        size,
        particles,
        flash: Flash {
            radius: FLASH_RADIUS * size,
            scale: 1.0,
            opacity: FLASH_INITIAL_OPACITY,
        },
    };
    let visual = attach(scene, id, EntityKind::Explosion, position);

    world.spawn((
        Explosion,
        Lifecycle {
            id,
            age: 0.0,
            max_lifetime: Some(tuning.lifetime_secs),
            alive: true,
        },
        Position(position),
        burst,
        visual,
    ));
    tracing::debug!(id = id.0, ?position, size, count, "explosion spawned");
    id
}

fn random_particle(rng: &mut ChaCha8Rng, size: f32) -> Particle {
    // Uniform direction on the sphere.
    let theta = rng.gen::<f32>() * TAU;
    let cos_phi = rng.gen::<f32>() * 2.0 - 1.0;
    let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
    let direction = Vec3::new(sin_phi * theta.cos(), cos_phi, sin_phi * theta.sin());
    let offset = direction * rng.gen::<f32>() * PARTICLE_SPREAD * size;

    let velocity = Vec3::new(
        (rng.gen::<f32>() - 0.5) * PARTICLE_SPEED * size,
        (rng.gen::<f32>() - 0.5) * PARTICLE_SPEED * size,
        (rng.gen::<f32>() - 0.5) * PARTICLE_SPEED * size,
    );

    Particle {
        offset,
        velocity,
        radius: lerp_range(rng, PARTICLE_RADIUS_MIN, PARTICLE_RADIUS_MAX),
        scale: 1.0,
        opacity: 1.0,
        hsl: [
            rng.gen::<f32>() * 0.1,
            0.8 + rng.gen::<f32>() * 0.2,
            0.5 + rng.gen::<f32>() * 0.5,
        ],
    }
}

fn lerp_range(rng: &mut ChaCha8Rng, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}
