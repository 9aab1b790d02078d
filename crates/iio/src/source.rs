use crate::device::IioDevice;
use sensor_core::{Result, SensorError, SensorSource};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Reads one raw channel attribute, e.g. `in_voltage0_raw`.
#[derive(Debug, Clone)]
pub struct IioSource {
    attr: PathBuf,
}

impl IioSource {
    pub fn new(device: &IioDevice, channel: &str) -> Self {
        Self {
            attr: device.path.join(channel),
        }
    }

    /// Path of the attribute read on every sample.
    pub fn path(&self) -> &Path {
        &self.attr
    }
}

impl SensorSource for IioSource {
    fn read_raw(&mut self) -> impl Future<Output = Result<i32>> + Send {
        let path = self.attr.clone();
        async move {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| SensorError::Read(format!("'{}': {e}", path.display())))?;
            parse_raw(&raw)
        }
    }
}

/// Parse the contents of a sysfs `*_raw` attribute.
pub fn parse_raw(raw: &str) -> Result<i32> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i32>()
        .map_err(|e| SensorError::Read(format!("invalid raw value '{trimmed}': {e}")))
}
