use crate::slot::Slot;
use sensor_core::{Result, SensorError};

/// Fixed-capacity window of recent samples, oldest first.
///
/// Backed by a ring buffer: `head` is the physical position of logical
/// index 0 (the oldest slot). Pushing overwrites the oldest slot and advances
/// `head`, which is observably the same as shifting every slot one step
/// toward index 0 and writing the new sample at index `N - 1`.
///
/// `count` and `sum` always equal the number and the total of the present
/// slots.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    slots: Vec<Slot>,
    head:  usize,
    count: usize,
    sum:   i64,
}

impl SlidingWindow {
    /// Create an empty window holding `capacity` slots.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SensorError::Config(
                "window capacity must be positive".into(),
            ));
        }

        Ok(Self {
            slots: vec![Slot::Empty; capacity],
            head:  0,
            count: 0,
            sum:   0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The only index ever considered for spike removal: `N / 2`.
    pub fn spike_index(&self) -> usize {
        self.capacity() / 2
    }

    /// Number of present samples.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sum of present samples.
    pub fn sum(&self) -> i64 {
        self.sum
    }

    /// Slot at logical `index` (0 = oldest), or `None` when out of range.
    pub fn slot(&self, index: usize) -> Option<Slot> {
        (index < self.capacity()).then(|| self.slots[self.physical(index)])
    }

    /// All slots, oldest to newest.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.capacity()).map(move |i| self.slots[self.physical(i)])
    }

    /// Mean of every present sample, `None` when the window holds nothing.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum as f64 / self.count as f64)
    }

    /// Spike detection needs at least `N - 2` present samples.
    pub fn is_almost_full(&self) -> bool {
        self.count >= self.capacity().saturating_sub(2)
    }

    /// Evict the oldest slot and append `sample` as the newest.
    pub fn push(&mut self, sample: i32) {
        let oldest = self.head;

        if let Slot::Present(v) = self.slots[oldest] {
            self.sum -= i64::from(v);
            self.count -= 1;
        }

        self.slots[oldest] = Slot::Present(sample);
        self.sum += i64::from(sample);
        self.count += 1;

        self.head = (self.head + 1) % self.capacity();
    }

    /// Drop the middle sample if it is the single value below (or above)
    /// the window average. Returns the removed value.
    ///
    /// Only the slot at [`spike_index`](Self::spike_index) is ever cleared,
    /// even when a singular outlier sits elsewhere in the window: the check
    /// runs once per push, so an outlier is caught when it passes through
    /// the middle. Skipped while fewer than `N - 2` samples are present.
    pub fn suppress_spike(&mut self) -> Option<i32> {
        if !self.is_almost_full() {
            return None;
        }
        let avg = self.average()?;

        let (lt, gt) = self
            .slots
            .iter()
            .filter_map(|s| s.value())
            .map(f64::from)
            .fold((0usize, 0usize), |(lt, gt), v| {
                if v < avg {
                    (lt + 1, gt)
                } else if v > avg {
                    (lt, gt + 1)
                } else {
                    (lt, gt)
                }
            });

        if lt != 1 && gt != 1 {
            return None;
        }

        let idx = self.physical(self.spike_index());
        let value = self.slots[idx].value()?;
        let v = f64::from(value);

        if (lt == 1 && v < avg) || (gt == 1 && v > avg) {
            self.slots[idx] = Slot::Empty;
            self.sum -= i64::from(value);
            self.count -= 1;
            return Some(value);
        }

        None
    }

    /// Mean of the present samples in the older half (`0..N/2`).
    ///
    /// The newer half hasn't passed the spike check yet, so it's left out.
    /// `None` when the older half is empty.
    pub fn smoothed_value(&self) -> Option<f64> {
        let (n, total) = self
            .slots()
            .take(self.spike_index())
            .filter_map(Slot::value)
            .fold((0usize, 0i64), |(n, total), v| (n + 1, total + i64::from(v)));

        (n > 0).then(|| total as f64 / n as f64)
    }

    fn physical(&self, index: usize) -> usize {
        (self.head + index) % self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(capacity: usize) -> SlidingWindow {
        SlidingWindow::new(capacity).expect("positive capacity")
    }

    fn values(w: &SlidingWindow) -> Vec<Option<i32>> {
        w.slots().map(Slot::value).collect()
    }

    fn assert_consistent(w: &SlidingWindow) {
        let present: Vec<i32> = w.slots().filter_map(Slot::value).collect();
        assert_eq!(w.slots().count(), w.capacity());
        assert_eq!(w.count(), present.len());
        assert_eq!(w.sum(), present.iter().map(|&v| i64::from(v)).sum::<i64>());
    }

    /// Push `sample` and run the spike check, the way a sampler tick does.
    fn tick(w: &mut SlidingWindow, sample: i32) -> Option<i32> {
        w.push(sample);
        w.suppress_spike()
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(SlidingWindow::new(0).is_err());
    }

    #[test]
    fn new_window_is_empty() {
        let w = window(10);
        assert_eq!(w.capacity(), 10);
        assert_eq!(w.spike_index(), 5);
        assert_eq!(w.count(), 0);
        assert_eq!(w.sum(), 0);
        assert!(w.slots().all(|s| s == Slot::Empty));
        assert_eq!(w.slot(10), None);
    }

    #[test]
    fn push_keeps_oldest_to_newest_order() {
        let mut w = window(3);
        w.push(1);
        assert_eq!(values(&w), vec![None, None, Some(1)]);

        for v in 2..=5 {
            w.push(v);
        }
        assert_eq!(values(&w), vec![Some(3), Some(4), Some(5)]);
        assert_eq!(w.count(), 3);
        assert_eq!(w.sum(), 12);
    }

    #[test]
    fn running_totals_track_present_slots() {
        let mut w = window(10);
        let mut seed: u32 = 0x2545_f491;

        for i in 0..500 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let sample = if i % 7 == 0 { 5_000 } else { (seed >> 22) as i32 };

            w.push(sample);
            assert_consistent(&w);
            assert_eq!(w.slot(9), Some(Slot::Present(sample)));

            w.suppress_spike();
            assert_consistent(&w);
        }
    }

    #[test]
    fn suppression_only_clears_the_middle_slot() {
        let mut w = window(10);
        let mut seed: u32 = 7;

        for i in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let sample = match i % 11 {
                0 => -800,
                5 => 9_000,
                _ => 400 + (seed >> 28) as i32,
            };
            w.push(sample);

            let before = values(&w);
            let removed = w.suppress_spike();
            let after = values(&w);

            for (idx, (b, a)) in before.iter().zip(&after).enumerate() {
                if idx != w.spike_index() {
                    assert_eq!(b, a, "slot {idx} changed");
                }
            }
            match removed {
                Some(v) => {
                    assert_eq!(before[5], Some(v));
                    assert_eq!(after[5], None);
                }
                None => assert_eq!(before, after),
            }
        }
    }

    #[test]
    fn high_spike_removed_when_it_reaches_the_middle() {
        let mut w = window(10);
        for _ in 0..8 {
            assert_eq!(tick(&mut w, 50), None);
        }

        // Lands at index 9; a singular high value but not in the middle yet.
        assert_eq!(tick(&mut w, 1000), None);
        assert_eq!(w.slot(9), Some(Slot::Present(1000)));

        for _ in 0..3 {
            assert_eq!(tick(&mut w, 50), None);
        }
        assert_eq!(tick(&mut w, 50), Some(1000));

        assert_eq!(w.slot(5), Some(Slot::Empty));
        assert_eq!(w.count(), 9);
        assert_eq!(w.sum(), 450);
        assert_eq!(w.smoothed_value(), Some(50.0));
    }

    #[test]
    fn low_spike_removed_when_it_reaches_the_middle() {
        let mut w = window(10);
        for _ in 0..10 {
            w.push(100);
        }
        w.push(0);
        for _ in 0..3 {
            assert_eq!(tick(&mut w, 100), None);
        }
        assert_eq!(tick(&mut w, 100), Some(0));
        assert_eq!(w.average(), Some(100.0));
    }

    #[test]
    fn steady_signal_has_no_spike() {
        let mut w = window(10);
        for _ in 0..10 {
            assert_eq!(tick(&mut w, 50), None);
        }
        assert_eq!(w.count(), 10);
        assert_eq!(w.smoothed_value(), Some(50.0));
    }

    #[test]
    fn outlier_away_from_middle_is_kept() {
        // Known limitation of the heuristic: only index N/2 is eligible.
        let mut w = window(10);
        for _ in 0..10 {
            w.push(50);
        }
        w.push(1000);

        let before = values(&w);
        assert_eq!(w.suppress_spike(), None);
        assert_eq!(values(&w), before);
        assert_eq!(w.count(), 10);
    }

    #[test]
    fn value_equal_to_average_is_not_a_spike() {
        let mut w = window(3);
        w.push(1);
        w.push(2);
        w.push(3);
        // lt == 1 and gt == 1, but the middle value sits exactly on the mean.
        assert_eq!(w.suppress_spike(), None);
        assert_eq!(w.count(), 3);
    }

    #[test]
    fn suppression_skipped_until_almost_full() {
        let mut w = window(10);
        for v in [50, 50, 1_000, 50, 50, 50, 50] {
            w.push(v);
        }
        // The high value sits at index 5, but 7 present < N - 2.
        assert_eq!(w.slot(5), Some(Slot::Present(1_000)));
        assert_eq!(w.suppress_spike(), None);
        assert_eq!(w.count(), 7);

        w.push(50);
        assert_eq!(w.suppress_spike(), None);
        assert_eq!(w.slot(4), Some(Slot::Present(1_000)));
    }

    #[test]
    fn empty_window_yields_nothing() {
        let mut w = window(2);
        // N - 2 == 0, so only the empty-count guard prevents dividing by zero.
        assert_eq!(w.suppress_spike(), None);
        assert_eq!(w.smoothed_value(), None);
        assert_eq!(w.average(), None);

        let mut w = window(10);
        assert_eq!(w.suppress_spike(), None);
        assert_eq!(w.smoothed_value(), None);
    }

    #[test]
    fn smoothed_value_needs_the_older_half() {
        let mut w = window(10);
        for v in 1..=5 {
            w.push(v);
        }
        // Samples occupy indices 5..=9 only.
        assert_eq!(w.smoothed_value(), None);

        w.push(6);
        assert_eq!(w.slot(4), Some(Slot::Present(1)));
        assert_eq!(w.smoothed_value(), Some(1.0));
    }

    #[test]
    fn smoothed_value_ignores_middle_and_newer() {
        let mut w = window(4);
        for v in [10, 20, 1_000, 2_000] {
            w.push(v);
        }
        assert_eq!(w.smoothed_value(), Some(15.0));
    }

    #[test]
    fn refill_after_removal_counts_present_slots() {
        let mut w = window(10);
        for _ in 0..10 {
            w.push(50);
        }
        w.push(1000);
        for _ in 0..4 {
            tick(&mut w, 50);
        }
        assert_eq!(w.slot(5), Some(Slot::Empty));

        let present_in_last = values(&w)[1..].iter().filter(|v| v.is_some()).count();
        w.push(7);
        assert_eq!(w.count(), present_in_last + 1);
        assert_consistent(&w);
    }
}
