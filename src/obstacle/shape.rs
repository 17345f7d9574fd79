use glam::{Mat3, Vec3};

use crate::constants::obstacles::EFFECTIVE_RADIUS_SCALE;

/// Obstacle primitive kinds
///
/// Discriminants match the geometry codes used by the pose feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Ground plane; never collides and never deflects
    Plane = 0,
    /// size = [radius, _, _]
    Sphere = 2,
    /// size = [radius, half_height, _], axis along local Z
    Capsule = 3,
    /// size = [radius, half_height, _], axis along local Z
    Cylinder = 5,
    /// size = half extents along local X, Y, Z
    Box = 6,
}

impl ObstacleKind {
    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ObstacleKind::Plane),
            2 => Some(ObstacleKind::Sphere),
            3 => Some(ObstacleKind::Capsule),
            5 => Some(ObstacleKind::Cylinder),
            6 => Some(ObstacleKind::Box),
            _ => None,
        }
    }
}

/// A posed obstacle primitive, immutable for the tick it was built for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub position: Vec3,
    /// Local-to-world basis
    pub orientation: Mat3,
    pub size: [f32; 3],
    world_to_local: Mat3,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, position: Vec3, orientation: Mat3, size: [f32; 3]) -> Self {
        let orientation = sanitize_orientation(orientation);
        Self {
            kind,
            position,
            orientation,
            size,
            world_to_local: orientation.inverse(),
        }
    }

    pub fn sphere(position: Vec3, radius: f32) -> Self {
        Self::new(ObstacleKind::Sphere, position, Mat3::IDENTITY, [radius, 0.0, 0.0])
    }

    pub fn capsule(position: Vec3, orientation: Mat3, radius: f32, half_height: f32) -> Self {
        Self::new(ObstacleKind::Capsule, position, orientation, [radius, half_height, 0.0])
    }

    pub fn cylinder(position: Vec3, orientation: Mat3, radius: f32, half_height: f32) -> Self {
        Self::new(ObstacleKind::Cylinder, position, orientation, [radius, half_height, 0.0])
    }

    pub fn cuboid(position: Vec3, orientation: Mat3, half_extents: Vec3) -> Self {
        Self::new(ObstacleKind::Box, position, orientation, half_extents.to_array())
    }

    pub fn ground_plane(position: Vec3) -> Self {
        Self::new(ObstacleKind::Plane, position, Mat3::IDENTITY, [0.0; 3])
    }

    /// First size parameter; the radius for round shapes
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size[0]
    }

    /// Whether this obstacle takes part in collision and deflection
    #[inline]
    pub fn participates_in_flow(&self) -> bool {
        self.kind != ObstacleKind::Plane
    }

    /// World point expressed in the obstacle's local frame
    #[inline]
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.world_to_local * (point - self.position)
    }

    /// Point-in-shape test. Zero or negative sizes contain nothing.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let [s0, s1, s2] = self.size;
        match self.kind {
            ObstacleKind::Plane => false,
            ObstacleKind::Sphere => point.distance(self.position) < s0,
            ObstacleKind::Capsule => {
                let local = self.to_local(point);
                local.truncate().length() < s0 && local.z.abs() < s1 + s0
            }
            ObstacleKind::Cylinder => {
                let local = self.to_local(point);
                local.truncate().length() < s0 && local.z.abs() < s1
            }
            ObstacleKind::Box => {
                let local = self.to_local(point).abs();
                local.x < s0 && local.y < s1 && local.z < s2
            }
        }
    }

    /// Influence-equivalent sphere radius used to scale deflection distance
    pub fn effective_radius(&self) -> f32 {
        let [s0, s1, s2] = self.size;
        match self.kind {
            ObstacleKind::Plane => 0.0,
            ObstacleKind::Sphere | ObstacleKind::Cylinder => s0 * EFFECTIVE_RADIUS_SCALE,
            ObstacleKind::Capsule => s0.max(s1) * EFFECTIVE_RADIUS_SCALE,
            ObstacleKind::Box => s0.max(s1).max(s2) * EFFECTIVE_RADIUS_SCALE,
        }
    }
}

/// Singular or non-finite bases fall back to identity
fn sanitize_orientation(orientation: Mat3) -> Mat3 {
    let det = orientation.determinant();
    if det.is_finite() && det.abs() > 1e-6 {
        orientation
    } else {
        log::warn!("Degenerate obstacle orientation (det = {}), using identity", det);
        Mat3::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        for kind in [
            ObstacleKind::Plane,
            ObstacleKind::Sphere,
            ObstacleKind::Capsule,
            ObstacleKind::Cylinder,
            ObstacleKind::Box,
        ] {
            assert_eq!(ObstacleKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ObstacleKind::from_code(1), None);
        assert_eq!(ObstacleKind::from_code(4), None);
    }

    #[test]
    fn test_sphere_containment() {
        let sphere = Obstacle::sphere(Vec3::new(1.0, 2.0, 3.0), 2.0);
        assert!(sphere.contains_point(Vec3::new(1.0, 2.0, 3.0)));
        assert!(sphere.contains_point(Vec3::new(2.9, 2.0, 3.0)));
        assert!(!sphere.contains_point(Vec3::new(3.0, 2.0, 3.0)));
    }

    #[test]
    fn test_capsule_includes_caps() {
        let capsule = Obstacle::capsule(Vec3::ZERO, Mat3::IDENTITY, 0.5, 1.0);
        assert!(capsule.contains_point(Vec3::new(0.0, 0.0, 1.4)));
        assert!(!capsule.contains_point(Vec3::new(0.0, 0.0, 1.6)));
        assert!(!capsule.contains_point(Vec3::new(0.6, 0.0, 0.0)));

        let cylinder = Obstacle::cylinder(Vec3::ZERO, Mat3::IDENTITY, 0.5, 1.0);
        assert!(!cylinder.contains_point(Vec3::new(0.0, 0.0, 1.4)));
        assert!(cylinder.contains_point(Vec3::new(0.0, 0.3, 0.9)));
    }

    #[test]
    fn test_rotated_cylinder_uses_local_axis() {
        // Local Z mapped onto world X
        let orientation = Mat3::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let cylinder = Obstacle::cylinder(Vec3::ZERO, orientation, 0.5, 2.0);

        assert!(cylinder.contains_point(Vec3::new(1.8, 0.0, 0.0)));
        assert!(!cylinder.contains_point(Vec3::new(0.0, 0.0, 1.8)));
    }

    #[test]
    fn test_box_containment() {
        let cuboid = Obstacle::cuboid(
            Vec3::new(0.0, 0.0, 1.0),
            Mat3::IDENTITY,
            Vec3::new(1.0, 2.0, 0.5),
        );
        assert!(cuboid.contains_point(Vec3::new(0.9, -1.9, 1.4)));
        assert!(!cuboid.contains_point(Vec3::new(0.9, -1.9, 1.6)));
        assert!(!cuboid.contains_point(Vec3::new(1.1, 0.0, 1.0)));
    }

    #[test]
    fn test_degenerate_sizes_contain_nothing() {
        let sphere = Obstacle::sphere(Vec3::ZERO, 0.0);
        assert!(!sphere.contains_point(Vec3::ZERO));

        let negative = Obstacle::sphere(Vec3::ZERO, -1.0);
        assert!(!negative.contains_point(Vec3::ZERO));

        let plane = Obstacle::ground_plane(Vec3::ZERO);
        assert!(!plane.contains_point(Vec3::ZERO));
        assert!(!plane.participates_in_flow());
    }

    #[test]
    fn test_singular_orientation_falls_back_to_identity() {
        let flat = Obstacle::cuboid(Vec3::ZERO, Mat3::ZERO, Vec3::ONE);
        assert_eq!(flat.orientation, Mat3::IDENTITY);
        assert!(flat.contains_point(Vec3::splat(0.5)));
    }

    #[test]
    fn test_effective_radius() {
        assert_eq!(Obstacle::sphere(Vec3::ZERO, 2.0).effective_radius(), 3.0);
        let cylinder = Obstacle::cylinder(Vec3::ZERO, Mat3::IDENTITY, 2.0, 10.0);
        assert_eq!(cylinder.effective_radius(), 3.0);
        let capsule = Obstacle::capsule(Vec3::ZERO, Mat3::IDENTITY, 1.0, 4.0);
        assert_eq!(capsule.effective_radius(), 6.0);
        let cuboid = Obstacle::cuboid(Vec3::ZERO, Mat3::IDENTITY, Vec3::new(1.0, 3.0, 2.0));
        assert_eq!(cuboid.effective_radius(), 4.5);
    }
}
