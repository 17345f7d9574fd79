//! Wind particle population: SoA buffers, inlet spawning, and the per-tick update.

pub mod color;
pub mod particle_data;
pub mod spawn;
pub mod update;

pub use color::particle_color;
pub use particle_data::{prepare_render_data, ParticleVertex, WindParticleData};
pub use spawn::{populate, recycle_particle, TunnelVolume};
pub use update::{step_particle, update_particles, FlowStepParams, TickStats};
