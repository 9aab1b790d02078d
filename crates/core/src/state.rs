use chrono::{DateTime, Local};
use std::fmt;

/// Lifecycle of the periodic sampler.
///
/// `Idle` until the device reports ready, `Sampling` while the timer is
/// armed, and back to `Idle` once the sampler is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerState {
    #[default]
    Idle,
    Sampling,
}

/// A smoothed value ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Smoothed value, already scaled to the display unit.
    pub value: f64,
    /// Number of decimal digits to show.
    pub precision: u8,
    /// Unit label, e.g. `"%"`.
    pub unit: String,
    /// When the tick that produced this reading fired.
    pub at: DateTime<Local>,
}

impl Reading {
    pub fn new(value: f64, precision: u8, unit: impl Into<String>) -> Self {
        Self {
            value,
            precision,
            unit: unit.into(),
            at: Local::now(),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = self.precision as usize;
        if self.unit.is_empty() {
            write!(f, "{:.prec$}", self.value)
        } else {
            write!(f, "{:.prec$} {}", self.value, self.unit)
        }
    }
}
