use glam::Vec3;

use crate::constants::flow::{INFLUENCE_CUTOFF, PARALLEL_THRESHOLD, VERTICAL_BIAS};
use crate::obstacle::Obstacle;

/// Velocity perturbation around one obstacle.
///
/// Quadratic falloff to zero at `INFLUENCE_CUTOFF` effective radii. The
/// direction is perpendicular to both the flow and the line to the obstacle,
/// tilted vertically so flow arcs over or under it. The result has length
/// `strength * influence²` whenever it is nonzero.
pub fn deflection(point: Vec3, velocity: Vec3, obstacle: &Obstacle, strength: f32) -> Vec3 {
    if !obstacle.participates_in_flow() {
        return Vec3::ZERO;
    }

    let reach = obstacle.effective_radius() * INFLUENCE_CUTOFF;
    if !(reach > 0.0) {
        return Vec3::ZERO;
    }

    let to_obstacle = obstacle.position - point;
    let distance = to_obstacle.length();
    if distance > reach {
        return Vec3::ZERO;
    }

    let influence = (1.0 - distance / reach).max(0.0);
    let magnitude = strength * influence * influence;

    let velocity_dir = velocity.try_normalize().unwrap_or(Vec3::X);
    let to_obstacle_dir = to_obstacle.normalize_or_zero();

    let mut direction = velocity_dir.cross(to_obstacle_dir);
    if direction.length() < PARALLEL_THRESHOLD {
        // Head-on approach: any perpendicular will do
        direction = Vec3::X.cross(to_obstacle_dir);
    }
    direction = direction.normalize_or_zero();

    direction.z += if point.z < obstacle.position.z {
        VERTICAL_BIAS
    } else {
        -VERTICAL_BIAS
    };

    direction.normalize_or_zero() * magnitude
}

/// Sum of deflections over every flow obstacle
pub fn total_deflection<'a>(
    point: Vec3,
    velocity: Vec3,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    strength: f32,
) -> Vec3 {
    obstacles
        .into_iter()
        .map(|obstacle| deflection(point, velocity, obstacle, strength))
        .fold(Vec3::ZERO, |acc, d| acc + d)
}

/// Radial push used to bend static curves away from an obstacle.
///
/// Zero at or beyond `influence_factor * radius`; grows to
/// `push_factor * radius` at the centre. A point exactly at the centre is
/// pushed along +Y.
pub fn radial_push(
    point: Vec3,
    obstacle: &Obstacle,
    influence_factor: f32,
    push_factor: f32,
) -> Vec3 {
    if !obstacle.participates_in_flow() {
        return Vec3::ZERO;
    }

    let radius = obstacle.radius();
    let influence_radius = radius * influence_factor;
    if !(influence_radius > 0.0) {
        return Vec3::ZERO;
    }

    let to_point = point - obstacle.position;
    let distance = to_point.length();
    if distance >= influence_radius {
        return Vec3::ZERO;
    }

    let influence = (1.0 - distance / influence_radius).max(0.0);
    let push = influence * influence * radius * push_factor;
    let direction = if distance > 1e-3 { to_point / distance } else { Vec3::Y };

    direction * push
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::ObstacleKind;
    use glam::Mat3;

    const WIND: Vec3 = Vec3::new(8.0, 0.0, 0.0);

    #[test]
    fn test_no_influence_beyond_cutoff() {
        let sphere = Obstacle::sphere(Vec3::ZERO, 3.0);
        // effective radius 4.5, reach 13.5
        assert_eq!(deflection(Vec3::new(-13.6, 0.0, 0.0), WIND, &sphere, 5.0), Vec3::ZERO);
        assert_eq!(deflection(Vec3::new(0.0, 20.0, 0.0), WIND, &sphere, 5.0), Vec3::ZERO);
        assert!(deflection(Vec3::new(-13.0, 0.0, 0.0), WIND, &sphere, 5.0).length() > 0.0);
    }

    #[test]
    fn test_magnitude_is_quadratic() {
        let sphere = Obstacle::sphere(Vec3::ZERO, 2.0);
        let reach = 9.0;
        let point = Vec3::new(-3.0, 1.0, -2.0);
        let influence = 1.0 - point.length() / reach;

        let d = deflection(point, WIND, &sphere, 5.0);
        assert!((d.length() - 5.0 * influence * influence).abs() < 1e-5);
    }

    #[test]
    fn test_magnitude_non_increasing_with_distance() {
        let sphere = Obstacle::sphere(Vec3::ZERO, 3.0);
        let direction = Vec3::new(-1.0, 0.4, 0.2).normalize();
        let mut previous = f32::INFINITY;
        for step in 0..200 {
            let distance = step as f32 * 0.1;
            let magnitude = deflection(direction * distance, WIND, &sphere, 5.0).length();
            assert!(magnitude <= previous + 1e-6, "increase at distance {}", distance);
            previous = magnitude;
        }
        assert_eq!(previous, 0.0);
    }

    #[test]
    fn test_head_on_still_deflects() {
        let sphere = Obstacle::sphere(Vec3::ZERO, 3.0);
        let d = deflection(Vec3::new(-10.0, 0.0, 0.0), WIND, &sphere, 5.0);
        assert!(d.length() > 0.0);
        assert!(d.is_finite());
    }

    #[test]
    fn test_vertical_bias_follows_height() {
        let sphere = Obstacle::sphere(Vec3::ZERO, 3.0);
        let below = deflection(Vec3::new(-5.0, 0.0, -1.0), WIND, &sphere, 5.0);
        let above = deflection(Vec3::new(-5.0, 0.0, 1.0), WIND, &sphere, 5.0);
        // Perpendicular part is horizontal here, so the bias decides the sign
        assert!(below.z > 0.0);
        assert!(above.z < 0.0);
    }

    #[test]
    fn test_plane_and_degenerate_obstacles_are_inert() {
        let plane = Obstacle::ground_plane(Vec3::ZERO);
        assert_eq!(deflection(Vec3::new(0.5, 0.0, 0.0), WIND, &plane, 5.0), Vec3::ZERO);

        let empty = Obstacle::sphere(Vec3::ZERO, 0.0);
        assert_eq!(deflection(Vec3::ZERO, WIND, &empty, 5.0), Vec3::ZERO);

        let negative = Obstacle::new(
            ObstacleKind::Box,
            Vec3::ZERO,
            Mat3::IDENTITY,
            [-1.0, -2.0, -3.0],
        );
        assert_eq!(deflection(Vec3::ZERO, WIND, &negative, 5.0), Vec3::ZERO);
    }

    #[test]
    fn test_deflection_at_obstacle_centre_is_finite() {
        let sphere = Obstacle::sphere(Vec3::ZERO, 1.0);
        let d = deflection(Vec3::ZERO, Vec3::ZERO, &sphere, 5.0);
        assert!(d.is_finite());
        assert!((d.length() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_total_deflection_superposes() {
        let a = Obstacle::sphere(Vec3::new(0.0, 2.0, 0.0), 1.0);
        let b = Obstacle::sphere(Vec3::new(0.0, -2.0, 0.5), 1.0);
        let point = Vec3::new(-1.0, 0.0, 0.0);

        let sum = total_deflection(point, WIND, [&a, &b], 5.0);
        let expected = deflection(point, WIND, &a, 5.0) + deflection(point, WIND, &b, 5.0);
        assert!((sum - expected).length() < 1e-6);
    }

    #[test]
    fn test_radial_push() {
        let sphere = Obstacle::sphere(Vec3::ZERO, 2.0);

        // Zero at and past 2.5 radii
        assert_eq!(radial_push(Vec3::new(5.0, 0.0, 0.0), &sphere, 2.5, 1.5), Vec3::ZERO);

        let push = radial_push(Vec3::new(0.0, 0.0, 2.5), &sphere, 2.5, 1.5);
        let influence: f32 = 1.0 - 2.5 / 5.0;
        assert!(push.x.abs() < 1e-6 && push.y.abs() < 1e-6);
        assert!((push.z - influence * influence * 3.0).abs() < 1e-5);

        let centre = radial_push(Vec3::ZERO, &sphere, 2.5, 1.5);
        assert!((centre - Vec3::new(0.0, 3.0, 0.0)).length() < 1e-5);
    }
}
