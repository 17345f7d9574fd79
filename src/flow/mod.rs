//! Flow deflection field around obstacles.

pub mod deflection;

pub use deflection::{deflection, radial_push, total_deflection};
