use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{flow, obstacles, streamlines, tunnel};
use crate::error::{FlowError, FlowResult};

/// Wind tunnel configuration
///
/// Defaults reproduce the reference tunnel. Every field may be omitted from a
/// TOML file; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelConfig {
    pub particle_count: usize,
    pub tunnel_length: f32,
    pub tunnel_width: f32,
    pub tunnel_height: f32,
    pub inlet_depth: f32,
    pub timestep: f32,
    pub age_floor: f32,
    pub age_headroom: f32,
    pub default_wind_speed: f32,
    pub deflection_strength: f32,
    pub proxy_radius: f32,
    /// `None` removes the static origin sphere from the obstacle snapshot
    pub origin_sphere_radius: Option<f32>,
    /// Fixed seed for reproducible spawning; entropy when absent
    pub seed: Option<u64>,
    /// Run the per-particle pass on a rayon pool
    pub parallel: bool,
    pub worker_threads: usize,
    pub streamlines: StreamlineConfig,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            particle_count: tunnel::PARTICLE_COUNT,
            tunnel_length: tunnel::LENGTH,
            tunnel_width: tunnel::WIDTH,
            tunnel_height: tunnel::HEIGHT,
            inlet_depth: tunnel::INLET_DEPTH,
            timestep: tunnel::TIMESTEP,
            age_floor: tunnel::AGE_FLOOR,
            age_headroom: tunnel::AGE_HEADROOM,
            default_wind_speed: tunnel::DEFAULT_WIND_SPEED,
            deflection_strength: flow::DEFLECTION_STRENGTH,
            proxy_radius: obstacles::PROXY_RADIUS,
            origin_sphere_radius: Some(obstacles::ORIGIN_SPHERE_RADIUS),
            seed: None,
            parallel: true,
            worker_threads: num_cpus::get(),
            streamlines: StreamlineConfig::default(),
        }
    }
}

impl TunnelConfig {
    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(raw: &str) -> FlowResult<Self> {
        let config: TunnelConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> FlowResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| FlowError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        log::info!("Loaded tunnel config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> FlowResult<()> {
        if self.particle_count == 0 {
            return Err(FlowError::InvalidConfig("particle_count must be positive".into()));
        }
        if !(self.timestep > 0.0) {
            return Err(FlowError::InvalidConfig(format!(
                "timestep must be positive, got {}",
                self.timestep
            )));
        }
        for (name, value) in [
            ("tunnel_length", self.tunnel_length),
            ("tunnel_width", self.tunnel_width),
            ("tunnel_height", self.tunnel_height),
        ] {
            if !(value > 0.0) {
                return Err(FlowError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.inlet_depth < 0.0 {
            return Err(FlowError::InvalidConfig("inlet_depth must not be negative".into()));
        }
        if self.worker_threads == 0 {
            return Err(FlowError::InvalidConfig("worker_threads must be positive".into()));
        }
        self.streamlines.validate()
    }

    /// Tunnel extents as a vector (length, width, height)
    pub fn extents(&self) -> glam::Vec3 {
        glam::Vec3::new(self.tunnel_length, self.tunnel_width, self.tunnel_height)
    }

    /// Maximum particle age in ticks for a given wind speed.
    ///
    /// Long enough for a particle to cross the whole tunnel with headroom.
    /// Without wind there is nothing to cross, so the floor applies.
    pub fn max_age(&self, wind_speed: f32) -> f32 {
        if !(wind_speed > 0.0) {
            return self.age_floor;
        }
        let traverse_ticks = self.tunnel_length / (wind_speed * self.timestep);
        (traverse_ticks * self.age_headroom).max(self.age_floor)
    }
}

/// Streamline tracing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamlineConfig {
    pub seeds_y: usize,
    pub seeds_z: usize,
    pub tunnel_extent: f32,
    pub max_steps: usize,
    pub step_dt: f32,
    pub deflection_strength: f32,
    pub arrow_interval: usize,
    pub arrow_length: f32,
    pub influence_factor: f32,
    pub push_factor: f32,
}

impl Default for StreamlineConfig {
    fn default() -> Self {
        Self {
            seeds_y: streamlines::SEEDS_Y,
            seeds_z: streamlines::SEEDS_Z,
            tunnel_extent: streamlines::TUNNEL_EXTENT,
            max_steps: streamlines::MAX_STEPS,
            step_dt: streamlines::STEP_DT,
            deflection_strength: streamlines::DEFLECTION_STRENGTH,
            arrow_interval: streamlines::ARROW_INTERVAL,
            arrow_length: streamlines::ARROW_LENGTH,
            influence_factor: streamlines::INFLUENCE_FACTOR,
            push_factor: streamlines::PUSH_FACTOR,
        }
    }
}

impl StreamlineConfig {
    pub fn validate(&self) -> FlowResult<()> {
        if self.seeds_y < 2 || self.seeds_z < 2 {
            return Err(FlowError::InvalidConfig(
                "streamline seed grid needs at least 2x2 seeds".into(),
            ));
        }
        if !(self.step_dt > 0.0) {
            return Err(FlowError::InvalidConfig("streamline step_dt must be positive".into()));
        }
        if self.arrow_interval == 0 {
            return Err(FlowError::InvalidConfig("arrow_interval must be positive".into()));
        }
        Ok(())
    }
}
