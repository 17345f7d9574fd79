//! Obstacle primitives and the per-tick obstacle snapshot.

pub mod shape;
pub mod snapshot;

pub use shape::{Obstacle, ObstacleKind};
pub use snapshot::{ObstacleDescriptor, ObstacleSnapshot};
