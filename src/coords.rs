//! Conversion between the simulation frame (Z-up) and the renderer frame (Y-up).
//!
//! The simulation keeps X as the flow axis and Z as vertical. Renderers in
//! the Y-up convention see the same point at `(x, z, -y)`.

use glam::Vec3;

/// Simulation (Z-up) to renderer (Y-up)
#[inline]
pub fn z_up_to_y_up(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, -v.y)
}

/// Renderer (Y-up) to simulation (Z-up)
#[inline]
pub fn y_up_to_z_up(v: Vec3) -> Vec3 {
    Vec3::new(v.x, -v.z, v.y)
}

/// Array form used when filling render buffers
#[inline]
pub fn z_up_to_y_up_array(v: Vec3) -> [f32; 3] {
    [v.x, v.z, -v.y]
}
