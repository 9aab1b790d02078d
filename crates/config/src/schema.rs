use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure parsed from `sensor.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Timer, window and display settings.
    pub sampler: SamplerConfig,
    /// Which ADC channel to read.
    pub device: DeviceConfig,
}

/// Periodic sampler settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Tick period in milliseconds.
    pub period_ms: u64,
    /// Number of samples kept in the sliding window.
    pub window_size: usize,
    /// Raw value corresponding to 100 % (1024 for a 10-bit ADC).
    pub full_scale: f64,
    /// Decimal digits shown for each reading.
    pub precision: u8,
    /// Unit label shown next to each reading.
    pub unit: String,
    /// Upper bound on a single sensor read; slower reads skip the tick.
    pub read_timeout_ms: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            period_ms:       1_000,
            window_size:     10,
            full_scale:      1024.0,
            precision:       2,
            unit:            "%".to_string(),
            read_timeout_ms: 500,
        }
    }
}

/// Industrial I/O (sysfs) device selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Directory holding one subdirectory per IIO device.
    pub root: PathBuf,
    /// First device whose `name` starts with this (case-insensitive) is used.
    pub name_prefix: String,
    /// Channel attribute holding the raw ADC value.
    pub channel: String,
    /// Delay between readiness probes while the device isn't answering.
    pub ready_retry_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            root:           PathBuf::from("/sys/bus/iio/devices"),
            name_prefix:    "arduino".to_string(),
            channel:        "in_voltage0_raw".to_string(),
            ready_retry_ms: 2_000,
        }
    }
}
