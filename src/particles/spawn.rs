use glam::Vec3;
use rand::Rng;

use crate::config::TunnelConfig;
use crate::particles::particle_data::WindParticleData;

/// Tunnel volume centred on the reference position.
///
/// Particles spawn in a slab just upstream of the inlet plane and live until
/// they leave the volume (slab included) or outgrow their maximum age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunnelVolume {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub inlet_depth: f32,
}

impl TunnelVolume {
    pub fn new(center: Vec3, config: &TunnelConfig) -> Self {
        Self {
            center,
            half_extents: config.extents() * 0.5,
            inlet_depth: config.inlet_depth,
        }
    }

    /// X coordinate of the inlet plane
    #[inline]
    pub fn inlet_x(&self) -> f32 {
        self.center.x - self.half_extents.x
    }

    /// X coordinate of the outlet plane
    #[inline]
    pub fn outlet_x(&self) -> f32 {
        self.center.x + self.half_extents.x
    }

    /// Whether a particle at `point` is still inside the tunnel
    pub fn contains(&self, point: Vec3) -> bool {
        let offset = point - self.center;
        point.x <= self.outlet_x()
            && point.x >= self.inlet_x() - self.inlet_depth
            && offset.y.abs() <= self.half_extents.y
            && offset.z.abs() <= self.half_extents.z
    }

    /// Whether `point` lies in the spawn slab
    pub fn inlet_contains(&self, point: Vec3) -> bool {
        let offset = point - self.center;
        point.x >= self.inlet_x() - self.inlet_depth
            && point.x <= self.inlet_x()
            && offset.y.abs() <= self.half_extents.y
            && offset.z.abs() <= self.half_extents.z
    }

    /// Random position in the spawn slab
    pub fn sample_inlet<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            self.inlet_x() - uniform(rng, self.inlet_depth),
            self.center.y + spread(rng, self.half_extents.y),
            self.center.z + spread(rng, self.half_extents.z),
        )
    }
}

/// Uniform in `[0, max)`, zero for an empty range
fn uniform<R: Rng + ?Sized>(rng: &mut R, max: f32) -> f32 {
    if max > 0.0 {
        rng.gen_range(0.0..max)
    } else {
        0.0
    }
}

/// Uniform in `[-half, half)`, zero for an empty range
fn spread<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

/// Put every particle at the inlet with a staggered age so they do not all
/// recycle on the same tick
pub fn populate<R: Rng + ?Sized>(
    particles: &mut WindParticleData,
    volume: &TunnelVolume,
    wind_speed: f32,
    max_age: f32,
    rng: &mut R,
) {
    for i in 0..particles.len() {
        particles.positions[i] = volume.sample_inlet(rng);
        particles.velocities[i] = Vec3::new(wind_speed, 0.0, 0.0);
        particles.ages[i] = uniform(rng, max_age);
    }
}

/// Reset one particle to inlet conditions
#[inline]
pub fn recycle_particle<R: Rng + ?Sized>(
    particles: &mut WindParticleData,
    index: usize,
    volume: &TunnelVolume,
    wind_speed: f32,
    rng: &mut R,
) {
    particles.positions[index] = volume.sample_inlet(rng);
    particles.velocities[index] = Vec3::new(wind_speed, 0.0, 0.0);
    particles.ages[index] = 0.0;
}
