use glam::Vec3;

use crate::config::StreamlineConfig;
use crate::coords::z_up_to_y_up;
use crate::flow::radial_push;
use crate::obstacle::ObstacleSnapshot;
use crate::streamlines::dataset::{DisplacedStreamlines, FlowArrow, FlowCurve, StreamlineDataset};

/// Push one point away from every obstacle it is close to (simulation frame)
pub fn displace_point(point: Vec3, snapshot: &ObstacleSnapshot, config: &StreamlineConfig) -> Vec3 {
    let displacement = snapshot
        .flow_obstacles()
        .map(|o| radial_push(point, o, config.influence_factor, config.push_factor))
        .fold(Vec3::ZERO, |acc, push| acc + push);
    point + displacement
}

/// Displace every curve point and convert curves and arrows to the renderer
/// frame. Arrow glyphs are converted but keep their positions.
pub fn displace_streamlines(
    dataset: &StreamlineDataset,
    snapshot: &ObstacleSnapshot,
    config: &StreamlineConfig,
) -> DisplacedStreamlines {
    let curves = dataset
        .curves
        .iter()
        .map(|curve| FlowCurve {
            points: curve
                .points
                .iter()
                .map(|&p| z_up_to_y_up(displace_point(p, snapshot, config)))
                .collect(),
            color: curve.color,
        })
        .collect();

    let arrows = dataset
        .arrows
        .iter()
        .map(|arrow| FlowArrow {
            origin: z_up_to_y_up(arrow.origin),
            direction: z_up_to_y_up(arrow.direction),
            color: arrow.color,
        })
        .collect();

    DisplacedStreamlines { curves, arrows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::Obstacle;

    fn origin_sphere() -> ObstacleSnapshot {
        std::iter::once(Obstacle::sphere(Vec3::ZERO, 3.0)).collect()
    }

    #[test]
    fn test_far_points_only_change_frame() {
        let config = StreamlineConfig::default();
        let dataset = StreamlineDataset {
            curves: vec![FlowCurve {
                points: vec![Vec3::new(-20.0, 1.0, 2.0), Vec3::new(20.0, -1.0, 2.0)],
                color: [0.2, 0.5, 1.0],
            }],
            arrows: vec![FlowArrow {
                origin: Vec3::new(1.0, 2.0, 3.0),
                direction: Vec3::new(0.0, 0.5, 0.0),
                color: [1.0, 0.667, 0.267],
            }],
        };

        let out = displace_streamlines(&dataset, &origin_sphere(), &config);

        assert_eq!(out.curves[0].points[0], Vec3::new(-20.0, 2.0, -1.0));
        assert_eq!(out.curves[0].points[1], Vec3::new(20.0, 2.0, 1.0));
        assert_eq!(out.curves[0].color, [0.2, 0.5, 1.0]);
        assert_eq!(out.arrows[0].origin, Vec3::new(1.0, 3.0, -2.0));
        assert_eq!(out.arrows[0].direction, Vec3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn test_near_points_move_outward() {
        let config = StreamlineConfig::default();
        let snapshot = origin_sphere();

        for p in [Vec3::new(-4.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 1.0), Vec3::new(1.0, -1.0, -5.0)] {
            let moved = displace_point(p, &snapshot, &config);
            assert!(moved.length() > p.length(), "{:?} did not move outward", p);
            // Direction is preserved by a radial push
            assert!(moved.normalize().dot(p.normalize()) > 0.9999);
        }
    }

    #[test]
    fn test_pushes_superpose() {
        let config = StreamlineConfig::default();
        let a = Obstacle::sphere(Vec3::new(-1.0, 0.0, 0.0), 1.0);
        let b = Obstacle::sphere(Vec3::new(1.0, 0.0, 0.0), 1.0);
        let snapshot: ObstacleSnapshot = [a, b].into_iter().collect();

        // Symmetric pushes cancel at the midpoint
        let moved = displace_point(Vec3::new(0.0, 0.0, 0.0), &snapshot, &config);
        assert!(moved.length() < 1e-5);
    }
}
