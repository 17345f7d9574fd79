use std::path::PathBuf;

/// Errors surfaced by the wind tunnel.
///
/// Numeric edge cases inside the per-tick kernels are never errors; they
/// degrade to a muted effect instead. These variants cover configuration,
/// feed decoding and the buffer-length contract.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown obstacle kind code: {0}")]
    UnknownObstacleKind(u32),

    #[error("Streamline dataset parse error: {0}")]
    DatasetParse(#[from] serde_json::Error),

    #[error("Particle buffer length mismatch: {positions} pos, {velocities} vel, {ages} ages")]
    BufferLengthMismatch {
        positions: usize,
        velocities: usize,
        ages: usize,
    },

    #[error("Worker pool creation failed: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type FlowResult<T> = Result<T, FlowError>;
