use sensor_core::SensorSource;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{info, warn};

/// Spawn a task that probes `source` until one read succeeds, then fires
/// the returned device-ready signal exactly once.
///
/// The probe gives up quietly when the receiver is dropped.
pub fn wait_until_ready<S>(mut source: S, retry: Duration) -> oneshot::Receiver<()>
where
    S: SensorSource + 'static,
{
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        loop {
            if tx.is_closed() {
                return; // nobody is waiting any more
            }

            match source.read_raw().await {
                Ok(raw) => {
                    info!(raw, "Device ready");
                    let _ = tx.send(());
                    return;
                }
                Err(e) => {
                    warn!("Device not ready: {e}; retrying in {} ms", retry.as_millis());
                }
            }

            tokio::time::sleep(retry).await;
        }
    });

    rx
}
