//! sensor — samples an analog light sensor and reports a smoothed reading.
//!
//! Run with:  `RUST_LOG=info sensor`

use anyhow::{Context, Result};
use sensor_core::Reading;
use sensor_iio::{discover, wait_until_ready, IioSource};
use sensor_sampler::spawn_reading_stream;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("sensor v{} starting", env!("CARGO_PKG_VERSION"));

    let path = sensor_config::default_path();
    let config = sensor_config::load(&path)
        .with_context(|| format!("loading {}", path.display()))?;

    let device = discover(&config.device.root, &config.device.name_prefix)?;
    let source = IioSource::new(&device, &config.device.channel);

    let retry = Duration::from_millis(config.device.ready_retry_ms);
    let ready = wait_until_ready(source.clone(), retry);
    let (sampler, readings) = spawn_reading_stream(&config.sampler, source, ready)?;

    display_readings(readings, tokio::signal::ctrl_c()).await;

    sampler.stop().await?;
    Ok(())
}

/// Log every reading until `shutdown` resolves or the sampler goes away.
/// Returns how many readings were shown.
///
/// A shutdown listener that fails is switched off; sampling carries on.
async fn display_readings<F>(mut readings: mpsc::Receiver<Reading>, shutdown: F) -> usize
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(shutdown);
    let mut listening = true;
    let mut shown = 0;

    loop {
        tokio::select! {
            reading = readings.recv() => match reading {
                Some(reading) => {
                    info!("Light: {reading}");
                    shown += 1;
                }
                None => break, // sampler exited
            },
            signal = &mut shutdown, if listening => match signal {
                Ok(()) => {
                    info!("Shutting down");
                    break;
                }
                Err(e) => {
                    error!("Cannot listen for Ctrl-C: {e}; sampling continues");
                    listening = false;
                }
            },
        }
    }

    shown
}
