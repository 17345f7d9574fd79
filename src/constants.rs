// Wind Tunnel Constants - SINGLE SOURCE OF TRUTH
//
// Every tuning value used by the flow simulation lives here. Config defaults
// read from this file, and the physics kernels use the non-configurable
// values directly.
//
// Units are simulation units (metres) in the Z-up simulation frame. Ages are
// counted in ticks, not seconds.

/// Tunnel geometry and population defaults
pub mod tunnel {
    /// Particles in the population (fixed for the session)
    pub const PARTICLE_COUNT: usize = 20_000;

    /// Tunnel extents, centred on the reference position
    pub const LENGTH: f32 = 64.0;
    pub const WIDTH: f32 = 64.0;
    pub const HEIGHT: f32 = 64.0;

    /// Particles spawn up to this far upstream of the inlet plane
    pub const INLET_DEPTH: f32 = 5.0;

    /// Fixed integration step per tick (seconds)
    pub const TIMESTEP: f32 = 0.02;

    /// Maximum particle age never drops below this many ticks
    pub const AGE_FLOOR: f32 = 200.0;

    /// Headroom over the tunnel traversal time when deriving max age
    pub const AGE_HEADROOM: f32 = 1.2;

    /// Ambient wind speed when the feed supplies none
    pub const DEFAULT_WIND_SPEED: f32 = 8.0;
}

/// Obstacle defaults for the reference configuration
pub mod obstacles {
    /// Radius of the sphere standing in for the moving body
    pub const PROXY_RADIUS: f32 = 0.75;

    /// Radius of the static sphere at the world origin
    pub const ORIGIN_SPHERE_RADIUS: f32 = 3.0;

    /// Anisotropic shapes are treated as spheres this much larger than their
    /// dominant dimension
    pub const EFFECTIVE_RADIUS_SCALE: f32 = 1.5;
}

/// Flow field constants
pub mod flow {
    /// Deflection strength used by the particle pass
    pub const DEFLECTION_STRENGTH: f32 = 5.0;

    /// Obstacles have no influence beyond this many effective radii
    pub const INFLUENCE_CUTOFF: f32 = 3.0;

    /// Cross products shorter than this count as parallel
    pub const PARALLEL_THRESHOLD: f32 = 0.1;

    /// Vertical component added before renormalising the deflection
    pub const VERTICAL_BIAS: f32 = 0.3;

    /// Particles within this many radii of an obstacle are "near geometry"
    pub const NEAR_GEOMETRY_FACTOR: f32 = 3.0;
}

/// Collision recovery constants
pub mod collision {
    /// Ejected particles are placed this many radii from the obstacle centre
    pub const STANDOFF_FACTOR: f32 = 1.2;

    /// Speed along the outward normal after ejection
    pub const EJECT_SPEED: f32 = 6.0;

    /// Forward velocity floor applied right after ejection
    pub const EJECT_FORWARD_FLOOR: f32 = 3.0;

    /// Global forward velocity floor, applied to every particle every tick
    pub const FORWARD_VELOCITY_FLOOR: f32 = 2.0;
}

/// Particle colour bands (RGB, linear 0..1)
pub mod colors {
    pub const FAST: [f32; 3] = [1.0, 0.1, 0.1];
    pub const BRISK: [f32; 3] = [0.8, 1.0, 0.2];
    pub const CALM: [f32; 3] = [0.2, 0.5, 1.0];

    /// Speed thresholds for the bands above
    pub const FAST_SPEED: f32 = 20.0;
    pub const BRISK_SPEED: f32 = 10.0;

    /// Near-geometry particles shade from orange towards red with turbulence
    pub const NEAR_RED: f32 = 1.0;
    pub const NEAR_GREEN_BASE: f32 = 0.5;
    pub const NEAR_GREEN_SPAN: f32 = 0.3;
    pub const NEAR_BLUE: f32 = 0.1;

    /// Speed at which near-geometry turbulence saturates
    pub const TURBULENCE_SPEED: f32 = 10.0;

    /// Arrow glyph colours (#ff4444, #ffaa44, #4488ff)
    pub const ARROW_STRONG: [f32; 3] = [1.0, 0.267, 0.267];
    pub const ARROW_MODERATE: [f32; 3] = [1.0, 0.667, 0.267];
    pub const ARROW_LIGHT: [f32; 3] = [0.267, 0.533, 1.0];

    pub const ARROW_STRONG_SPEED: f32 = 10.0;
    pub const ARROW_MODERATE_SPEED: f32 = 6.0;
}

/// Streamline visualisation constants
pub mod streamlines {
    /// Seed grid on the inlet plane
    pub const SEEDS_Y: usize = 12;
    pub const SEEDS_Z: usize = 12;

    /// The streamline tunnel is larger than the particle tunnel
    pub const TUNNEL_EXTENT: f32 = 120.0;

    pub const MAX_STEPS: usize = 80;
    pub const STEP_DT: f32 = 0.3;
    pub const DEFLECTION_STRENGTH: f32 = 4.0;

    /// An arrow is emitted every this many steps
    pub const ARROW_INTERVAL: usize = 15;
    pub const ARROW_LENGTH: f32 = 0.5;

    /// Forward floor after a collision while tracing
    pub const EJECT_FORWARD_FLOOR: f32 = 2.0;

    /// Push displacement: zero beyond `INFLUENCE_FACTOR * radius`,
    /// peak of `PUSH_FACTOR * radius` at the centre
    pub const INFLUENCE_FACTOR: f32 = 2.5;
    pub const PUSH_FACTOR: f32 = 1.5;

    /// Curves need more than this many points to be kept
    pub const MIN_CURVE_POINTS: usize = 2;
}
