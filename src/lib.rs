//! Procedural wind tunnel: a fixed particle population streaming past
//! obstacle primitives, plus displaced streamlines for visualisation.
//!
//! Simulation runs in a Z-up frame with X as the flow axis; render outputs
//! are converted to Y-up.

pub mod config;
pub mod constants;
pub mod coords;
pub mod error;
pub mod flow;
pub mod obstacle;
pub mod particles;
pub mod streamlines;
pub mod tunnel;

pub use config::{StreamlineConfig, TunnelConfig};
pub use error::{FlowError, FlowResult};
pub use flow::{deflection, radial_push};
pub use obstacle::{Obstacle, ObstacleDescriptor, ObstacleKind, ObstacleSnapshot};
pub use particles::{ParticleVertex, TickStats, TunnelVolume, WindParticleData};
pub use streamlines::{DisplacedStreamlines, StreamlineDataset};
pub use tunnel::{FlowInput, SharedFlowInput, WindTunnel};
