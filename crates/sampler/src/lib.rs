//! Timer-driven sampling loop.
//!
//! A [`PeriodicSampler`] sits idle until the device-ready signal fires, then
//! reads one raw sample per tick, runs it through the sliding-window filter
//! and forwards the smoothed percentage to a [`DisplaySink`]. Every failure
//! is contained within its tick: the timer keeps running.

pub mod schedule;
pub mod tick;

pub use schedule::first_tick_delay;
pub use tick::{to_percent, SampleProcessor, TickReport};

use chrono::{DateTime, Local};
use sensor_config::SamplerConfig;
use sensor_core::{DisplaySink, Reading, Result, SamplerState, SensorError, SensorSource};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Periodic sampler in its `Idle` state, ready to be spawned.
pub struct PeriodicSampler<S, D> {
    source:       S,
    sink:         D,
    processor:    SampleProcessor,
    period:       Duration,
    read_timeout: Duration,
    clock:        fn() -> DateTime<Local>,
}

impl<S, D> PeriodicSampler<S, D>
where
    S: SensorSource + 'static,
    D: DisplaySink + 'static,
{
    pub fn new(config: &SamplerConfig, source: S, sink: D) -> Result<Self> {
        Ok(Self {
            source,
            sink,
            processor:    SampleProcessor::new(config)?,
            period:       Duration::from_millis(config.period_ms),
            read_timeout: Duration::from_millis(config.read_timeout_ms),
            clock:        Local::now,
        })
    }

    /// Replace the wall clock used to align the first tick.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    /// Spawn the sampling task. It stays `Idle` until `ready` fires, then
    /// arms the timer exactly once.
    ///
    /// If `ready` is dropped without firing, the task exits without ever
    /// sampling.
    pub fn spawn(self, ready: oneshot::Receiver<()>) -> SamplerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (state_tx, state_rx) = watch::channel(SamplerState::Idle);

        let task = tokio::spawn(self.run(ready, shutdown_rx, state_tx));

        SamplerHandle {
            shutdown: shutdown_tx,
            state:    state_rx,
            task,
        }
    }

    async fn run(
        mut self,
        ready: oneshot::Receiver<()>,
        mut shutdown: oneshot::Receiver<()>,
        state: watch::Sender<SamplerState>,
    ) {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Sampler stopped before the device became ready");
                return;
            }
            signal = ready => {
                if signal.is_err() {
                    warn!("Device-ready signal dropped; sampler stays idle");
                    return;
                }
            }
        }

        let delay = first_tick_delay(self.period, &(self.clock)());
        let mut ticker = time::interval_at(Instant::now() + delay, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let _ = state.send(SamplerState::Sampling);
        info!(
            "Sampling every {} ms, first tick in {} ms",
            self.period.as_millis(),
            delay.as_millis()
        );

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break, // stop requested or handle dropped
                _ = ticker.tick() => self.tick().await,
            }

            if self.sink.is_closed() {
                info!("Display sink closed");
                break;
            }
        }

        let _ = state.send(SamplerState::Idle);
        info!("Sampler stopped");
    }

    async fn tick(&mut self) {
        let raw = match time::timeout(self.read_timeout, self.source.read_raw()).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!("Tick skipped: {e}");
                return;
            }
            Err(_) => {
                let timeout_ms = u64::try_from(self.read_timeout.as_millis()).unwrap_or(u64::MAX);
                warn!("Tick skipped: {}", SensorError::Timeout(timeout_ms));
                return;
            }
        };

        let report = self.processor.process(raw);

        if let Some(value) = report.removed {
            info!(value, "Spike removed");
        }

        match report.percent {
            Some(percent) => {
                debug!(raw, percent, "Tick");
                let precision = self.processor.precision();
                self.sink
                    .on_smoothed_value(percent, precision, self.processor.unit());
            }
            None => debug!(raw, "Tick: no smoothed value yet"),
        }
    }
}

/// Spawn a sampler that forwards readings through the returned channel, the
/// way the other background monitors report.
///
/// Readings are dropped rather than queued when the receiver falls behind.
pub fn spawn_reading_stream<S>(
    config: &SamplerConfig,
    source: S,
    ready: oneshot::Receiver<()>,
) -> Result<(SamplerHandle, mpsc::Receiver<Reading>)>
where
    S: SensorSource + 'static,
{
    let (tx, rx) = mpsc::channel(4);
    let handle = PeriodicSampler::new(config, source, tx)?.spawn(ready);
    Ok((handle, rx))
}

/// Control handle for a spawned sampler.
pub struct SamplerHandle {
    shutdown: oneshot::Sender<()>,
    state:    watch::Receiver<SamplerState>,
    task:     JoinHandle<()>,
}

impl SamplerHandle {
    pub fn state(&self) -> SamplerState {
        *self.state.borrow()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SamplerState> {
        self.state.clone()
    }

    /// Disarm the timer and wait for the task to finish.
    ///
    /// A tick already in flight completes first; nothing touches the window
    /// once this returns.
    pub async fn stop(self) -> Result<()> {
        let _ = self.shutdown.send(());
        self.task
            .await
            .map_err(|e| SensorError::Sampler(format!("sampler task failed: {e}")))
    }
}
