use glam::Vec3;
use rand::Rng;
use rayon::prelude::*;

use crate::constants::collision::{
    EJECT_FORWARD_FLOOR, EJECT_SPEED, FORWARD_VELOCITY_FLOOR, STANDOFF_FACTOR,
};
use crate::constants::flow::NEAR_GEOMETRY_FACTOR;
use crate::flow::total_deflection;
use crate::obstacle::{Obstacle, ObstacleSnapshot};
use crate::particles::color::particle_color;
use crate::particles::particle_data::WindParticleData;
use crate::particles::spawn::{recycle_particle, TunnelVolume};

/// Per-tick inputs shared by every particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowStepParams {
    pub wind_speed: f32,
    pub timestep: f32,
    pub deflection_strength: f32,
    /// Ticks a particle may live before it is recycled
    pub max_age: f32,
}

/// Counters for one tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    pub recycled: usize,
    pub collisions: usize,
    pub near_geometry: usize,
}

impl TickStats {
    fn merge(self, other: TickStats) -> TickStats {
        TickStats {
            recycled: self.recycled + other.recycled,
            collisions: self.collisions + other.collisions,
            near_geometry: self.near_geometry + other.near_geometry,
        }
    }
}

/// Advance the whole population by one tick.
///
/// The per-particle pass reads nothing but its own particle and the shared
/// obstacle list, so it may run on `pool`. Recycling draws from `rng` in
/// index order afterwards, which keeps results independent of the pool.
pub fn update_particles<R: Rng + ?Sized>(
    particles: &mut WindParticleData,
    snapshot: &ObstacleSnapshot,
    volume: &TunnelVolume,
    params: &FlowStepParams,
    rng: &mut R,
    pool: Option<&rayon::ThreadPool>,
) -> TickStats {
    // Mismatched buffers would be truncated by the zipped pass
    if let Err(e) = particles.validate() {
        panic!("wind particle population is corrupt: {}", e);
    }

    let obstacles: Vec<Obstacle> = snapshot.flow_obstacles().copied().collect();

    let mut stats = match pool {
        Some(pool) => pool.install(|| advance_parallel(particles, &obstacles, params)),
        None => advance_sequential(particles, &obstacles, params),
    };

    stats.recycled = recycle_expired(particles, volume, params, rng);
    stats
}

fn advance_sequential(
    particles: &mut WindParticleData,
    obstacles: &[Obstacle],
    params: &FlowStepParams,
) -> TickStats {
    let WindParticleData {
        positions,
        velocities,
        ages,
        colors,
    } = particles;

    positions
        .iter_mut()
        .zip(velocities.iter_mut())
        .zip(ages.iter_mut())
        .zip(colors.iter_mut())
        .map(|(((position, velocity), age), color)| {
            step_particle(position, velocity, age, color, obstacles, params)
        })
        .fold(TickStats::default(), TickStats::merge)
}

fn advance_parallel(
    particles: &mut WindParticleData,
    obstacles: &[Obstacle],
    params: &FlowStepParams,
) -> TickStats {
    let WindParticleData {
        positions,
        velocities,
        ages,
        colors,
    } = particles;

    positions
        .par_iter_mut()
        .zip(velocities.par_iter_mut())
        .zip(ages.par_iter_mut())
        .zip(colors.par_iter_mut())
        .map(|(((position, velocity), age), color)| {
            step_particle(position, velocity, age, color, obstacles, params)
        })
        .reduce(TickStats::default, TickStats::merge)
}

/// One particle, one tick.
///
/// Velocity is rebuilt from ambient flow every tick and never integrated
/// across ticks, so deflection cannot compound.
#[inline]
pub fn step_particle(
    position: &mut Vec3,
    velocity: &mut Vec3,
    age: &mut f32,
    color: &mut [f32; 3],
    obstacles: &[Obstacle],
    params: &FlowStepParams,
) -> TickStats {
    *age += 1.0;

    let ambient = Vec3::new(params.wind_speed, 0.0, 0.0);
    let mut vel =
        ambient + total_deflection(*position, ambient, obstacles, params.deflection_strength);

    let near_geometry = obstacles
        .iter()
        .any(|o| position.distance(o.position) < o.radius() * NEAR_GEOMETRY_FACTOR);

    // First containing obstacle wins
    let mut collided = false;
    if let Some(obstacle) = obstacles.iter().find(|o| o.contains_point(*position)) {
        let outward = (*position - obstacle.position).try_normalize().unwrap_or(Vec3::X);
        *position = obstacle.position + outward * obstacle.radius() * STANDOFF_FACTOR;
        vel = outward * EJECT_SPEED;
        vel.x = vel.x.max(EJECT_FORWARD_FLOOR);
        collided = true;
    }

    vel.x = vel.x.max(FORWARD_VELOCITY_FLOOR);

    *position += vel * params.timestep;
    *velocity = vel;
    *color = particle_color(vel.length(), near_geometry);

    TickStats {
        recycled: 0,
        collisions: collided as usize,
        near_geometry: near_geometry as usize,
    }
}

/// Recycle particles that left the tunnel or outlived `max_age`
fn recycle_expired<R: Rng + ?Sized>(
    particles: &mut WindParticleData,
    volume: &TunnelVolume,
    params: &FlowStepParams,
    rng: &mut R,
) -> usize {
    let mut recycled = 0;
    for i in 0..particles.len() {
        if particles.ages[i] > params.max_age || !volume.contains(particles.positions[i]) {
            recycle_particle(particles, i, volume, params.wind_speed, rng);
            recycled += 1;
        }
    }
    recycled
}
