use crate::state::Reading;
use std::fmt;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

/// Consumer of smoothed readings.
///
/// Called synchronously from the sampler's tick handler, at most once per
/// tick and only when a smoothed value exists. Implementations must not
/// block.
pub trait DisplaySink: Send {
    fn on_smoothed_value(&mut self, value: f64, precision: u8, unit: &str);

    /// `true` once nothing will ever consume another reading. The sampler
    /// stops when its sink closes.
    fn is_closed(&self) -> bool {
        false
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for Box<T> {
    fn on_smoothed_value(&mut self, value: f64, precision: u8, unit: &str) {
        (**self).on_smoothed_value(value, precision, unit);
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

/// Forward readings over a bounded channel. A full channel drops the
/// reading; the display keeps its previous value.
impl DisplaySink for mpsc::Sender<Reading> {
    fn on_smoothed_value(&mut self, value: f64, precision: u8, unit: &str) {
        match self.try_send(Reading::new(value, precision, unit)) {
            Ok(()) => {}
            Err(TrySendError::Full(r)) => debug!("Display busy; reading {r} dropped"),
            Err(TrySendError::Closed(_)) => debug!("Display receiver closed"),
        }
    }

    fn is_closed(&self) -> bool {
        mpsc::Sender::is_closed(self)
    }
}

impl DisplaySink for mpsc::UnboundedSender<Reading> {
    fn on_smoothed_value(&mut self, value: f64, precision: u8, unit: &str) {
        if self.send(Reading::new(value, precision, unit)).is_err() {
            debug!("Display receiver closed");
        }
    }

    fn is_closed(&self) -> bool {
        mpsc::UnboundedSender::is_closed(self)
    }
}

/// Named callback slot: hands every reading to a closure.
///
/// ```
/// use sensor_core::{sink::CallbackSink, DisplaySink, Reading};
///
/// let mut sink = CallbackSink::new(|value, precision, unit: &str| {
///     println!("Light: {}", Reading::new(value, precision, unit));
/// });
/// sink.on_smoothed_value(42.19, 2, "%");
/// ```
pub struct CallbackSink<F> {
    on_value: F,
}

impl<F> CallbackSink<F>
where
    F: FnMut(f64, u8, &str) + Send,
{
    pub fn new(on_value: F) -> Self {
        Self { on_value }
    }
}

impl<F> DisplaySink for CallbackSink<F>
where
    F: FnMut(f64, u8, &str) + Send,
{
    fn on_smoothed_value(&mut self, value: f64, precision: u8, unit: &str) {
        (self.on_value)(value, precision, unit);
    }
}

impl<F> fmt::Debug for CallbackSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSink").finish_non_exhaustive()
    }
}
