use glam::Vec3;

use crate::config::StreamlineConfig;
use crate::constants::collision::EJECT_SPEED;
use crate::constants::colors;
use crate::constants::streamlines::{EJECT_FORWARD_FLOOR, MIN_CURVE_POINTS};
use crate::flow::total_deflection;
use crate::obstacle::{Obstacle, ObstacleSnapshot};
use crate::streamlines::dataset::{FlowArrow, FlowCurve, StreamlineDataset};

/// Trace the streamline dataset for the current reference pose.
///
/// Seeds a grid on the inlet plane of a cubic tunnel around `reference` and
/// marches each seed through the deflection field. Returns `None` when there
/// is no wind to trace.
pub fn trace_streamlines(
    reference: Vec3,
    wind_speed: f32,
    snapshot: &ObstacleSnapshot,
    config: &StreamlineConfig,
) -> Option<StreamlineDataset> {
    if !(wind_speed > 0.0) {
        return None;
    }

    let obstacles: Vec<Obstacle> = snapshot.flow_obstacles().copied().collect();
    let half = config.tunnel_extent * 0.5;
    let mut dataset = StreamlineDataset::default();

    for i in 0..config.seeds_y {
        for j in 0..config.seeds_z {
            let seed = Vec3::new(
                reference.x - half,
                reference.y - half + grid_fraction(i, config.seeds_y) * config.tunnel_extent,
                reference.z - half + grid_fraction(j, config.seeds_z) * config.tunnel_extent,
            );

            let curve = trace_curve(
                seed,
                reference,
                wind_speed,
                &obstacles,
                config,
                &mut dataset.arrows,
            );
            if let Some(curve) = curve {
                dataset.curves.push(curve);
            }
        }
    }

    log::debug!(
        "Traced {} streamlines with {} arrows",
        dataset.curves.len(),
        dataset.arrows.len()
    );
    Some(dataset)
}

fn grid_fraction(index: usize, count: usize) -> f32 {
    if count > 1 {
        index as f32 / (count - 1) as f32
    } else {
        0.5
    }
}

fn trace_curve(
    seed: Vec3,
    reference: Vec3,
    wind_speed: f32,
    obstacles: &[Obstacle],
    config: &StreamlineConfig,
    arrows: &mut Vec<FlowArrow>,
) -> Option<FlowCurve> {
    let half = config.tunnel_extent * 0.5;
    let mut points = Vec::with_capacity(config.max_steps);
    let mut position = seed;

    for step in 0..config.max_steps {
        points.push(position);

        let ambient = Vec3::new(wind_speed, 0.0, 0.0);
        let mut velocity =
            ambient + total_deflection(position, ambient, obstacles, config.deflection_strength);

        if let Some(obstacle) = obstacles.iter().find(|o| o.contains_point(position)) {
            let away = (position - obstacle.position).normalize_or_zero();
            velocity = away * EJECT_SPEED;
            velocity.x = velocity.x.max(EJECT_FORWARD_FLOOR);
        }

        position += velocity * config.step_dt;

        let offset = position - reference;
        if offset.x > half || offset.y.abs() > half || offset.z.abs() > half {
            break;
        }

        if step > 0 && step % config.arrow_interval == 0 {
            arrows.push(FlowArrow {
                origin: position,
                direction: velocity.normalize_or_zero() * config.arrow_length,
                color: arrow_color(velocity.length()),
            });
        }
    }

    if points.len() <= MIN_CURVE_POINTS {
        return None;
    }

    let path_length: f32 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    let mean_speed = path_length / (points.len() - 1) as f32 / config.step_dt;

    Some(FlowCurve {
        points,
        color: curve_color(mean_speed),
    })
}

fn arrow_color(speed: f32) -> [f32; 3] {
    if speed > colors::ARROW_STRONG_SPEED {
        colors::ARROW_STRONG
    } else if speed > colors::ARROW_MODERATE_SPEED {
        colors::ARROW_MODERATE
    } else {
        colors::ARROW_LIGHT
    }
}

fn curve_color(speed: f32) -> [f32; 3] {
    if speed > colors::FAST_SPEED {
        colors::FAST
    } else if speed > colors::BRISK_SPEED {
        colors::BRISK
    } else {
        colors::CALM
    }
}
