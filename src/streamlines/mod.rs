//! Streamline visualisation: dataset tracing and the obstacle displacement pass.
//!
//! Both run off an obstacle snapshot and are far cheaper and less frequent
//! than the particle pass. The displacement pass only reruns when the dataset
//! or the reference position changes.

pub mod dataset;
pub mod displacement;
pub mod trace;

pub use dataset::{DisplacedStreamlines, FlowArrow, FlowCurve, StreamlineDataset};
pub use displacement::{displace_point, displace_streamlines};
pub use trace::trace_streamlines;
