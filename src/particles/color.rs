use crate::constants::colors::*;

/// Render colour for a particle. Has no effect on the physics.
///
/// Particles near geometry shade orange to red with turbulence. All others
/// fall into speed bands.
#[inline]
pub fn particle_color(speed: f32, near_geometry: bool) -> [f32; 3] {
    if near_geometry {
        let turbulence = (speed / TURBULENCE_SPEED).min(1.0);
        [NEAR_RED, NEAR_GREEN_BASE - turbulence * NEAR_GREEN_SPAN, NEAR_BLUE]
    } else if speed > FAST_SPEED {
        FAST
    } else if speed > BRISK_SPEED {
        BRISK
    } else {
        CALM
    }
}
