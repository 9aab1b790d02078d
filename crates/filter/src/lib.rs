//! Fixed-capacity sliding window with single-spike suppression.
//!
//! The window keeps the last `N` raw samples oldest-first, tracks a running
//! count and sum of the samples still present, and can drop one transient
//! outlier sitting at its middle slot. The reported value is the mean of the
//! older half, which has already been through the spike check.

pub mod slot;
pub mod window;

pub use slot::Slot;
pub use window::SlidingWindow;
