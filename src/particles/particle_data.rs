use glam::Vec3;

use crate::constants::colors;
use crate::coords::z_up_to_y_up_array;
use crate::error::{FlowError, FlowResult};

/// Wind particle population stored as parallel arrays (SoA).
///
/// All buffers have the same length for the lifetime of the population; the
/// population is never resized after construction.
pub struct WindParticleData {
    /// Positions in the simulation frame (Z-up)
    pub positions: Vec<Vec3>,
    /// Velocity used for the last integration step
    pub velocities: Vec<Vec3>,
    /// Age in ticks
    pub ages: Vec<f32>,
    /// Render colour (RGB) from the last tick
    pub colors: Vec<[f32; 3]>,
}

impl WindParticleData {
    /// Allocate a population of `count` particles at the origin
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![Vec3::ZERO; count],
            velocities: vec![Vec3::ZERO; count],
            ages: vec![0.0; count],
            colors: vec![colors::CALM; count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check the parallel-array contract
    pub fn validate(&self) -> FlowResult<()> {
        let n = self.positions.len();
        if self.velocities.len() != n || self.ages.len() != n || self.colors.len() != n {
            return Err(FlowError::BufferLengthMismatch {
                positions: n,
                velocities: self.velocities.len(),
                ages: self.ages.len(),
            });
        }
        Ok(())
    }
}

/// Point-cloud vertex for the renderer (Y-up)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Convert particle data to renderer vertices
pub fn prepare_render_data(particles: &WindParticleData, buffer: &mut Vec<ParticleVertex>) {
    buffer.clear();
    buffer.reserve(particles.len());

    buffer.extend(
        particles
            .positions
            .iter()
            .zip(&particles.colors)
            .map(|(position, color)| ParticleVertex {
                position: z_up_to_y_up_array(*position),
                color: *color,
            }),
    );
}
