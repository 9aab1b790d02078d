use crate::error::Result;
use std::future::Future;

/// Supplier of raw sensor readings (ADC counts).
///
/// The range is implementation-defined; a 10-bit ADC yields `0..=1023`.
/// A read that can stall is bounded by the sampler's read timeout, so
/// implementations don't need their own.
pub trait SensorSource: Send {
    fn read_raw(&mut self) -> impl Future<Output = Result<i32>> + Send;
}
