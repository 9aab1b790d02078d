use sensor_config::SamplerConfig;
use sensor_core::Result;
use sensor_filter::SlidingWindow;

/// What one tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Value dropped by spike suppression, if any.
    pub removed: Option<i32>,
    /// Smoothed reading as a percentage of full scale.
    pub percent: Option<f64>,
}

/// The per-tick pipeline: push, suppress, smooth, scale.
///
/// Owns the window exclusively; the sampler task is its only caller.
#[derive(Debug)]
pub struct SampleProcessor {
    window:     SlidingWindow,
    full_scale: f64,
    precision:  u8,
    unit:       String,
}

impl SampleProcessor {
    pub fn new(config: &SamplerConfig) -> Result<Self> {
        Ok(Self {
            window:     SlidingWindow::new(config.window_size)?,
            full_scale: config.full_scale,
            precision:  config.precision,
            unit:       config.unit.clone(),
        })
    }

    pub fn process(&mut self, raw: i32) -> TickReport {
        self.window.push(raw);
        let removed = self.window.suppress_spike();
        let percent = self
            .window
            .smoothed_value()
            .map(|v| to_percent(v, self.full_scale));

        TickReport { removed, percent }
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// Scale a raw value to a percentage of `full_scale`.
pub fn to_percent(value: f64, full_scale: f64) -> f64 {
    100.0 * value / full_scale
}
