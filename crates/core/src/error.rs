use thiserror::Error;

/// Top-level error type shared by every crate in the workspace.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("config error: {0}")]
    Config(String),

    #[error("device error: {0}")]
    Device(String),

    #[error("sensor read failed: {0}")]
    Read(String),

    #[error("sensor read timed out after {0} ms")]
    Timeout(u64),

    #[error("sampler error: {0}")]
    Sampler(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = SensorError> = std::result::Result<T, E>;
