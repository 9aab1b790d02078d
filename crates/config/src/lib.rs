pub mod schema;

pub use schema::{DeviceConfig, SamplerConfig, SensorConfig};

use sensor_core::{Result, SensorError};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `SensorConfig::default()`
/// if the file doesn't exist so the sampler always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<SensorConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(SensorConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| SensorError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<SensorConfig> {
    let config: SensorConfig =
        toml::from_str(raw).map_err(|e| SensorError::Config(format!("TOML parse error: {e}")))?;
    validate(&config)?;
    Ok(config)
}

/// Reject settings the sampler can't run with.
pub fn validate(config: &SensorConfig) -> Result<()> {
    let s = &config.sampler;

    if s.window_size < 2 {
        return Err(SensorError::Config(format!(
            "sampler.window_size must be at least 2 (got {})",
            s.window_size
        )));
    }
    if s.period_ms == 0 {
        return Err(SensorError::Config("sampler.period_ms must be positive".into()));
    }
    if s.read_timeout_ms == 0 {
        return Err(SensorError::Config("sampler.read_timeout_ms must be positive".into()));
    }
    if !(s.full_scale > 0.0) {
        return Err(SensorError::Config(format!(
            "sampler.full_scale must be positive (got {})",
            s.full_scale
        )));
    }
    if config.device.channel.is_empty() {
        return Err(SensorError::Config("device.channel must not be empty".into()));
    }

    Ok(())
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("sensor").join("sensor.toml")
}
