// Config files and streamline datasets end to end

use std::io::Write;

use glam::Vec3;
use tempfile::NamedTempFile;

use wind_tunnel::coords::z_up_to_y_up;
use wind_tunnel::{
    FlowError, FlowInput, ObstacleDescriptor, ObstacleSnapshot, StreamlineDataset, TunnelConfig,
    WindTunnel,
};

#[test]
fn test_load_config_from_file() {
    println!("Testing config file loading...");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
particle_count = 512
seed = 9
parallel = false
origin_sphere_radius = 4.5

[streamlines]
seeds_y = 4
seeds_z = 3
"#
    )
    .unwrap();

    let config = TunnelConfig::load(file.path()).unwrap();
    assert_eq!(config.particle_count, 512);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.origin_sphere_radius, Some(4.5));
    assert_eq!(config.streamlines.seeds_y, 4);
    assert_eq!(config.streamlines.max_steps, 80);
    assert_eq!(config.timestep, 0.02);

    let mut tunnel = WindTunnel::new(config).unwrap();
    let input = FlowInput {
        reference_position: Some(Vec3::new(0.0, 0.0, 6.0)),
        ..FlowInput::default()
    };
    assert!(tunnel.tick(&input).is_some());
    assert_eq!(tunnel.particle_vertices().len(), 512);

    println!("✅ Config file test passed");
}

#[test]
fn test_config_errors() {
    println!("Testing config errors...");

    let missing = TunnelConfig::load("/nonexistent/wind_tunnel.toml");
    assert!(matches!(missing, Err(FlowError::Io { .. })));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "particle_count = \"many\"").unwrap();
    assert!(matches!(TunnelConfig::load(file.path()), Err(FlowError::ConfigParse(_))));

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "timestep = 0.0").unwrap();
    assert!(matches!(TunnelConfig::load(file.path()), Err(FlowError::InvalidConfig(_))));

    println!("✅ Config error test passed");
}

#[test]
fn test_traced_dataset_survives_json_and_displacement() {
    println!("Testing streamline dataset pipeline...");

    let config = TunnelConfig {
        particle_count: 64,
        seed: Some(3),
        parallel: false,
        ..TunnelConfig::default()
    };
    let mut tunnel = WindTunnel::new(config).unwrap();
    let input = FlowInput {
        reference_position: Some(Vec3::new(2.0, 0.0, 1.0)),
        wind_speed: Some(8.0),
        geometry: Vec::new(),
    };

    let traced = tunnel.trace_streamlines(&input).unwrap();
    assert!(!traced.is_empty());

    let json = traced.to_json().unwrap();
    let reloaded = StreamlineDataset::from_json(&json).unwrap();
    assert_eq!(reloaded.curves.len(), traced.curves.len());
    assert_eq!(reloaded.arrows.len(), traced.arrows.len());

    tunnel.set_streamline_dataset(Some(reloaded));
    tunnel.tick(&input).unwrap();

    let displaced = tunnel.streamlines().unwrap();
    assert_eq!(displaced.curves.len(), traced.curves.len());
    for (out, src) in displaced.curves.iter().zip(&traced.curves) {
        assert_eq!(out.points.len(), src.points.len());
        assert_eq!(out.color, src.color);
    }
    // Arrows are only re-expressed in the renderer frame
    for (out, src) in displaced.arrows.iter().zip(&traced.arrows) {
        assert_eq!(out.origin, z_up_to_y_up(src.origin));
    }

    println!("✅ Streamline pipeline test passed");
}

#[test]
fn test_feed_descriptors() {
    println!("Testing obstacle descriptors from the feed...");

    let raw = r#"[
        {"type": 2, "pos": [0, 0, 1], "size": [0.5, 0, 0]},
        {"type": 6, "pos": [1, 0, 0], "mat": [0, -1, 0, 1, 0, 0, 0, 0, 1], "size": [1, 0.2, 0.2]},
        {"type": 9, "pos": [0, 0, 0]},
        {"type": 0, "pos": [0, 0, -2]}
    ]"#;
    let descriptors: Vec<ObstacleDescriptor> = serde_json::from_str(raw).unwrap();
    let snapshot = ObstacleSnapshot::from_descriptors(&descriptors);

    // Unknown code skipped; ground plane kept but inert
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.flow_obstacles().count(), 2);

    // Box rotated 90 degrees about Z: long axis now runs along world Y
    let cuboid = &snapshot.as_slice()[1];
    assert!(cuboid.contains_point(Vec3::new(1.0, 0.9, 0.0)));
    assert!(!cuboid.contains_point(Vec3::new(1.9, 0.0, 0.0)));

    println!("✅ Descriptor test passed");
}
