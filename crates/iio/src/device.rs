use sensor_core::{Result, SensorError};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// An IIO device directory and the name the driver reports for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IioDevice {
    pub path: PathBuf,
    pub name: String,
}

/// Find the first device under `root` whose name starts with `name_prefix`
/// (case-insensitive). Devices are visited in directory-name order.
pub fn discover(root: impl AsRef<Path>, name_prefix: &str) -> Result<IioDevice> {
    find_device(root.as_ref(), name_prefix)
        .inspect_err(|e| error!("IIO discovery failed: {e}"))
}

fn find_device(root: &Path, name_prefix: &str) -> Result<IioDevice> {
    let entries = std::fs::read_dir(root).map_err(|e| {
        SensorError::Device(format!("cannot list '{}': {e}", root.display()))
    })?;

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    dirs.sort();

    let prefix = name_prefix.to_lowercase();

    for path in dirs {
        let Ok(raw) = std::fs::read_to_string(path.join("name")) else {
            continue; // not a device, or no name attribute
        };
        let name = raw.trim().to_string();
        debug!("Found IIO device '{name}' at {}", path.display());

        if name.to_lowercase().starts_with(&prefix) {
            info!("Using {name} ({})", path.display());
            return Ok(IioDevice { path, name });
        }
    }

    Err(SensorError::Device(format!(
        "no device named '{name_prefix}*' under '{}'",
        root.display()
    )))
}
