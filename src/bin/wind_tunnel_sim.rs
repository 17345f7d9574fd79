//! Headless wind tunnel run
//!
//! Usage: wind_tunnel_sim [config.toml] [ticks]
//!
//! Flies the reference body on a slow circle around the origin sphere and
//! reports particle and streamline statistics.

use std::time::Instant;

use anyhow::Context;
use glam::{Mat3, Vec3};
use wind_tunnel::{FlowInput, Obstacle, SharedFlowInput, TunnelConfig, WindTunnel};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => TunnelConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => TunnelConfig::default(),
    };
    let ticks: u64 = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid tick count {:?}", raw))?,
        None => 600,
    };

    println!("=== Wind Tunnel Simulation ===\n");
    println!("  Particles: {}", config.particle_count);
    println!("  Ticks:     {}", ticks);
    println!("  Timestep:  {} s\n", config.timestep);

    let shared = SharedFlowInput::default();
    let mut tunnel = WindTunnel::new(config)?;

    let orbit_radius = 8.0;
    let start = Instant::now();
    let mut collisions = 0;
    let mut recycled = 0;

    for tick in 0..ticks {
        // Producer side: publish the pose for this tick
        let angle = tick as f32 * 0.01;
        let position = Vec3::new(angle.cos() * orbit_radius, angle.sin() * orbit_radius, 2.0);
        shared.publish(FlowInput {
            reference_position: Some(position),
            wind_speed: Some(8.0),
            // Payload slung under the airframe
            geometry: vec![Obstacle::cuboid(
                position - Vec3::new(0.0, 0.0, 0.3),
                Mat3::IDENTITY,
                Vec3::new(0.4, 0.4, 0.1),
            )],
        });

        if tick == 0 {
            let dataset = tunnel
                .trace_streamlines(&shared.latest())
                .context("no streamlines traced for the initial pose")?;
            println!(
                "Traced {} streamlines, {} arrows",
                dataset.curves.len(),
                dataset.arrows.len()
            );
            tunnel.set_streamline_dataset(Some(dataset));
        }

        if let Some(stats) = tunnel.tick_shared(&shared) {
            collisions += stats.collisions;
            recycled += stats.recycled;
            if tick % 100 == 0 {
                log::info!(
                    "tick {:>5}: {} near geometry, {} collisions, {} recycled",
                    tick,
                    stats.near_geometry,
                    stats.collisions,
                    stats.recycled
                );
            }
        }
    }

    let elapsed = start.elapsed();
    println!("\n## Results\n");
    println!("  Ticks run:        {}", tunnel.ticks());
    println!("  Total collisions: {}", collisions);
    println!("  Total recycled:   {}", recycled);
    println!(
        "  Mean tick time:   {:.3} ms",
        elapsed.as_secs_f64() * 1000.0 / ticks.max(1) as f64
    );
    if let Some(streamlines) = tunnel.streamlines() {
        let points: usize = streamlines.curves.iter().map(|c| c.points.len()).sum();
        println!("  Streamline points: {}", points);
    }

    Ok(())
}
