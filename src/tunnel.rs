use std::sync::Arc;

use glam::Vec3;
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::TunnelConfig;
use crate::error::FlowResult;
use crate::obstacle::{Obstacle, ObstacleSnapshot};
use crate::particles::{
    populate, prepare_render_data, update_particles, FlowStepParams, ParticleVertex, TickStats,
    TunnelVolume, WindParticleData,
};
use crate::streamlines::{
    displace_streamlines, trace_streamlines, DisplacedStreamlines, StreamlineDataset,
};

/// Values the pose feed supplies between ticks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowInput {
    /// Moving reference body; the tunnel stays idle until this is known
    pub reference_position: Option<Vec3>,
    pub wind_speed: Option<f32>,
    /// Body geometry: shapes traced streamlines and is carried for
    /// visualisation, but stays out of the particle pass
    pub geometry: Vec<Obstacle>,
}

/// Latest feed values, shared between the producer and the tunnel.
///
/// The producer replaces the whole value at once and the tunnel copies it at
/// the start of a tick, so a tick never sees a half-written update.
#[derive(Debug, Clone, Default)]
pub struct SharedFlowInput {
    inner: Arc<RwLock<FlowInput>>,
}

impl SharedFlowInput {
    pub fn new(input: FlowInput) -> Self {
        Self {
            inner: Arc::new(RwLock::new(input)),
        }
    }

    pub fn publish(&self, input: FlowInput) {
        *self.inner.write() = input;
    }

    /// Edit the pending value in place under the write lock
    pub fn update(&self, f: impl FnOnce(&mut FlowInput)) {
        f(&mut self.inner.write());
    }

    pub fn latest(&self) -> FlowInput {
        self.inner.read().clone()
    }
}

/// Wind tunnel session: owns the particle population and the streamline
/// view, and applies the enable/wind-speed controls between ticks.
pub struct WindTunnel {
    config: TunnelConfig,
    enabled: bool,
    wind_speed_override: Option<f32>,
    rng: StdRng,
    pool: Option<rayon::ThreadPool>,
    particles: Option<WindParticleData>,
    render_buffer: Vec<ParticleVertex>,
    attached_geometry: Vec<Obstacle>,
    last_reference: Option<Vec3>,
    streamline_source: Option<StreamlineDataset>,
    streamlines: Option<DisplacedStreamlines>,
    streamlines_dirty: bool,
    ticks: u64,
}

impl WindTunnel {
    pub fn new(config: TunnelConfig) -> FlowResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let pool = if config.parallel {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.worker_threads)
                    .thread_name(|i| format!("wind-tunnel-{}", i))
                    .build()?,
            )
        } else {
            None
        };

        log::info!(
            "Wind tunnel ready: {} particles, {}x{}x{} tunnel, {}",
            config.particle_count,
            config.tunnel_length,
            config.tunnel_width,
            config.tunnel_height,
            if pool.is_some() { "parallel" } else { "sequential" }
        );

        Ok(Self {
            render_buffer: Vec::with_capacity(config.particle_count),
            config,
            enabled: true,
            wind_speed_override: None,
            rng,
            pool,
            particles: None,
            attached_geometry: Vec::new(),
            last_reference: None,
            streamline_source: None,
            streamlines: None,
            streamlines_dirty: false,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &TunnelConfig {
        &self.config
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::info!("Wind tunnel {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Takes precedence over the feed's wind speed from the next tick on
    pub fn set_wind_speed(&mut self, wind_speed: f32) {
        log::info!("Wind speed set to {:.1} m/s", wind_speed);
        self.wind_speed_override = Some(wind_speed);
    }

    /// Setter value, else feed value, else the configured default
    pub fn wind_speed(&self, input: &FlowInput) -> f32 {
        self.wind_speed_override
            .or(input.wind_speed)
            .unwrap_or(self.config.default_wind_speed)
    }

    /// Whether a tick with `input` would advance the simulation
    pub fn is_active(&self, input: &FlowInput) -> bool {
        self.enabled && self.wind_speed(input) > 0.0 && input.reference_position.is_some()
    }

    /// Replace the curve/arrow dataset; the displacement pass reruns on the
    /// next active tick
    pub fn set_streamline_dataset(&mut self, dataset: Option<StreamlineDataset>) {
        self.streamline_source = dataset;
        self.streamlines_dirty = true;
    }

    /// Trace a fresh dataset for the given input's pose and wind speed.
    ///
    /// Curves march around the reference obstacles and then the body's own
    /// geometry; ground planes are skipped by the tracer.
    pub fn trace_streamlines(&self, input: &FlowInput) -> Option<StreamlineDataset> {
        let reference = input.reference_position?;
        let mut snapshot = ObstacleSnapshot::reference(reference, &self.config);
        for obstacle in &input.geometry {
            snapshot.push(*obstacle);
        }
        trace_streamlines(
            reference,
            self.wind_speed(input),
            &snapshot,
            &self.config.streamlines,
        )
    }

    /// Advance one render tick. Returns `None` while idle.
    pub fn tick(&mut self, input: &FlowInput) -> Option<TickStats> {
        self.attached_geometry.clone_from(&input.geometry);

        if !self.enabled {
            return None;
        }
        let wind_speed = self.wind_speed(input);
        if !(wind_speed > 0.0) {
            return None;
        }
        let Some(reference) = input.reference_position else {
            log::trace!("No reference position yet, wind tunnel idle");
            return None;
        };

        let snapshot = ObstacleSnapshot::reference(reference, &self.config);
        let volume = TunnelVolume::new(reference, &self.config);
        let params = FlowStepParams {
            wind_speed,
            timestep: self.config.timestep,
            deflection_strength: self.config.deflection_strength,
            max_age: self.config.max_age(wind_speed),
        };

        if self.particles.is_none() {
            let mut particles = WindParticleData::new(self.config.particle_count);
            populate(&mut particles, &volume, wind_speed, params.max_age, &mut self.rng);
            log::info!(
                "Spawned {} wind particles around ({:.2}, {:.2}, {:.2})",
                particles.len(),
                reference.x,
                reference.y,
                reference.z
            );
            self.particles = Some(particles);
        }
        let particles = self.particles.as_mut()?;

        let stats = update_particles(
            particles,
            &snapshot,
            &volume,
            &params,
            &mut self.rng,
            self.pool.as_ref(),
        );
        prepare_render_data(particles, &mut self.render_buffer);

        if self.last_reference != Some(reference) {
            self.streamlines_dirty = true;
            self.last_reference = Some(reference);
        }
        if self.streamlines_dirty {
            self.streamlines = self
                .streamline_source
                .as_ref()
                .map(|dataset| displace_streamlines(dataset, &snapshot, &self.config.streamlines));
            self.streamlines_dirty = false;
        }

        self.ticks += 1;
        log::debug!(
            "Tick {}: {} recycled, {} collisions, {} near geometry",
            self.ticks,
            stats.recycled,
            stats.collisions,
            stats.near_geometry
        );
        Some(stats)
    }

    /// Convenience for hosts that share the feed through a [`SharedFlowInput`]
    pub fn tick_shared(&mut self, shared: &SharedFlowInput) -> Option<TickStats> {
        let input = shared.latest();
        self.tick(&input)
    }

    pub fn particles(&self) -> Option<&WindParticleData> {
        self.particles.as_ref()
    }

    /// Point-cloud vertices from the last active tick (Y-up)
    pub fn particle_vertices(&self) -> &[ParticleVertex] {
        &self.render_buffer
    }

    pub fn streamlines(&self) -> Option<&DisplacedStreamlines> {
        self.streamlines.as_ref()
    }

    pub fn attached_geometry(&self) -> &[Obstacle] {
        &self.attached_geometry
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
