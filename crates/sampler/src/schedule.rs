use chrono::{DateTime, TimeZone};
use std::time::Duration;

/// Delay before the first tick so ticks land on whole-period boundaries of
/// the wall clock.
///
/// With the default 1 s period this is `1000 - now.millis`, i.e. the next
/// full second. A timestamp already on the boundary waits a full period.
pub fn first_tick_delay<Tz: TimeZone>(period: Duration, now: &DateTime<Tz>) -> Duration {
    let period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX).max(1);
    let millis = u64::from(now.timestamp_subsec_millis());

    Duration::from_millis(period_ms - millis % period_ms)
}
