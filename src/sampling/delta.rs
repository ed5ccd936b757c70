//! Generic two-sample counter differencing.
//!
//! Kernel counters come in two shapes and the two must not be conflated:
//! per-interface byte counters are 32-bit hardware registers that wrap at
//! `2^32`, while per-CPU tick counters are 64-bit accumulators that never
//! wrap in practice but can be reset (e.g. when the counter source is
//! replaced). [`RateCounter`] persists the minimal per-counter state needed
//! to turn successive raw readings plus elapsed time into deltas and
//! units-per-second rates.

/// Wrap boundary of the 32-bit hardware byte counters.
///
/// Kept distinct from the `u64` accumulator width on purpose: the variable
/// that accumulates deltas is wider than the register being sampled, and
/// the wrap arithmetic must use the register width.
pub const BYTE_COUNTER_WRAP_MAX: u64 = u32::MAX as u64;

/// Minimum meaningful sampling interval (seconds). Below this, dividing a
/// delta by the elapsed time produces garbage rates, so updates are skipped.
pub const MIN_SAMPLE_INTERVAL_SECS: f64 = 0.0001;

/// Computes the delta of a 32-bit wrapping counter.
///
/// Both readings are masked to the register width. A reading below the
/// previous one is interpreted as exactly one wrap:
/// `(BYTE_COUNTER_WRAP_MAX - prev) + new`. Multi-wrap detection is not
/// attempted; this undercounts if the sampling interval ever exceeds the
/// time for the counter to wrap twice, which the poller's cadence does not
/// currently guarantee.
pub fn wrapping_delta(prev: u64, new: u64) -> u64 {
    let prev = prev & BYTE_COUNTER_WRAP_MAX;
    let new = new & BYTE_COUNTER_WRAP_MAX;
    if new >= prev {
        new - prev
    } else {
        (BYTE_COUNTER_WRAP_MAX - prev) + new
    }
}

/// Computes the delta of a non-wrapping 64-bit counter.
///
/// A reading below the previous one is a counter reset, not a wrap, and
/// yields a zero delta; the caller re-baselines to the new reading.
pub fn monotonic_delta(prev: u64, new: u64) -> u64 {
    if new >= prev { new - prev } else { 0 }
}

/// Declared width of a tracked counter, which selects the delta rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterWidth {
    /// 32-bit hardware register, wraps at `2^32` (byte counters).
    Wrapping32,
    /// 64-bit kernel accumulator, never wraps but may reset (tick counters).
    Monotonic64,
}

/// Result of one [`RateCounter::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CounterUpdate {
    /// Raw counter delta for this interval, overflow-corrected.
    pub delta: u64,
    /// Delta divided by elapsed time (units/second). On a degenerate
    /// interval this is the previously held rate.
    pub rate: f64,
}

/// Persisted state for a single tracked counter.
///
/// `accumulated` is a non-decreasing running total reconstructed from the
/// successive (possibly wrapped) raw readings; it only moves backwards via
/// an explicit [`RateCounter::reset`].
#[derive(Debug, Clone)]
pub struct RateCounter {
    width: CounterWidth,
    last_raw: u64,
    accumulated: u64,
    rate: f64,
    /// False until the first reading baselines the counter.
    primed: bool,
}

impl RateCounter {
    /// Creates a tracker for a 32-bit wrapping counter.
    pub fn wrapping32() -> Self {
        Self::new(CounterWidth::Wrapping32)
    }

    /// Creates a tracker for a non-wrapping 64-bit counter.
    pub fn monotonic64() -> Self {
        Self::new(CounterWidth::Monotonic64)
    }

    fn new(width: CounterWidth) -> Self {
        Self {
            width,
            last_raw: 0,
            accumulated: 0,
            rate: 0.0,
            primed: false,
        }
    }

    /// Feeds one raw reading observed `elapsed_secs` after the previous one.
    ///
    /// The first reading only baselines the counter and reports zero.
    /// When `elapsed_secs` is at or below [`MIN_SAMPLE_INTERVAL_SECS`] the
    /// call is a no-op: state is not advanced (a zero-duration sample must
    /// not corrupt the accumulation) and the previously computed rate is
    /// held rather than divided by a near-zero interval.
    pub fn update(&mut self, new_raw: u64, elapsed_secs: f64) -> CounterUpdate {
        if !self.primed {
            self.primed = true;
            self.last_raw = new_raw;
            return CounterUpdate::default();
        }

        if elapsed_secs <= MIN_SAMPLE_INTERVAL_SECS {
            return CounterUpdate {
                delta: 0,
                rate: self.rate,
            };
        }

        let delta = match self.width {
            CounterWidth::Wrapping32 => wrapping_delta(self.last_raw, new_raw),
            CounterWidth::Monotonic64 => monotonic_delta(self.last_raw, new_raw),
        };

        self.last_raw = new_raw;
        self.accumulated += delta;
        self.rate = delta as f64 / elapsed_secs;

        CounterUpdate {
            delta,
            rate: self.rate,
        }
    }

    /// Re-baselines to `new_raw` and clears the running total.
    ///
    /// For use when the counter source itself was replaced; ordinary resets
    /// of monotonic counters are absorbed by [`RateCounter::update`].
    pub fn reset(&mut self, new_raw: u64) {
        self.last_raw = new_raw;
        self.accumulated = 0;
        self.rate = 0.0;
        self.primed = true;
    }

    /// Last raw reading fed to the counter.
    pub fn last_raw(&self) -> u64 {
        self.last_raw
    }

    /// Monotonic running total reconstructed across wraps.
    pub fn accumulated(&self) -> u64 {
        self.accumulated
    }

    /// Last computed rate (units/second).
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_delta_without_wrap() {
        assert_eq!(wrapping_delta(100, 100), 0);
        assert_eq!(wrapping_delta(100, 350), 250);
        assert_eq!(wrapping_delta(0, BYTE_COUNTER_WRAP_MAX), BYTE_COUNTER_WRAP_MAX);
    }

    #[test]
    fn wrapping_delta_single_wrap() {
        // prev near the boundary, new just past it
        assert_eq!(wrapping_delta(4_294_967_290, 5), 10);
        assert_eq!(wrapping_delta(BYTE_COUNTER_WRAP_MAX, 0), 0);
    }

    #[test]
    fn wrapping_delta_masks_wide_readings() {
        // A 64-bit reading of a 32-bit register carries garbage high bits.
        let wide = (7u64 << 32) | 500;
        assert_eq!(wrapping_delta(100, wide), 400);
    }

    #[test]
    fn monotonic_delta_plain_subtraction() {
        assert_eq!(monotonic_delta(1000, 1500), 500);
        assert_eq!(monotonic_delta(1000, 1000), 0);
    }

    #[test]
    fn monotonic_delta_reset_reports_zero() {
        assert_eq!(monotonic_delta(5000, 10), 0);
    }

    #[test]
    fn first_reading_only_baselines() {
        let mut c = RateCounter::wrapping32();
        let u = c.update(1_000_000, 10.0);
        assert_eq!(u.delta, 0);
        assert_eq!(u.rate, 0.0);
        assert_eq!(c.last_raw(), 1_000_000);
        assert_eq!(c.accumulated(), 0);
    }

    #[test]
    fn rate_is_delta_over_elapsed() {
        let mut c = RateCounter::wrapping32();
        c.update(1000, 10.0);
        let u = c.update(6000, 2.5);
        assert_eq!(u.delta, 5000);
        assert!((u.rate - 2000.0).abs() < 1e-9);
        assert_eq!(c.accumulated(), 5000);
    }

    #[test]
    fn accumulated_survives_wrap() {
        let mut c = RateCounter::wrapping32();
        c.update(4_294_967_290, 1.0);
        c.update(5, 1.0);
        assert_eq!(c.accumulated(), 10);
        assert_eq!(c.last_raw(), 5);
    }

    #[test]
    fn degenerate_interval_holds_previous_rate() {
        let mut c = RateCounter::wrapping32();
        c.update(1000, 1.0);
        c.update(2000, 1.0); // rate = 1000/s
        let before = c.clone();

        let u = c.update(9999, 0.00005);
        assert_eq!(u.delta, 0);
        assert!((u.rate - 1000.0).abs() < 1e-9);
        // state untouched: last_raw not advanced, accumulation not corrupted
        assert_eq!(c.last_raw(), before.last_raw());
        assert_eq!(c.accumulated(), before.accumulated());
    }

    #[test]
    fn monotonic_reset_rebaselines_with_zero_delta() {
        let mut c = RateCounter::monotonic64();
        c.update(5000, 1.0);
        let u = c.update(10, 1.0);
        assert_eq!(u.delta, 0);
        assert_eq!(u.rate, 0.0);
        assert_eq!(c.last_raw(), 10);
        // subsequent samples resume from the new baseline
        let u = c.update(110, 1.0);
        assert_eq!(u.delta, 100);
    }

    #[test]
    fn identical_replay_yields_zero_delta() {
        let mut c = RateCounter::wrapping32();
        c.update(1000, 1.0);
        let first = c.update(4000, 1.0);
        assert_eq!(first.delta, 3000);
        let second = c.update(4000, 1.0);
        assert_eq!(second.delta, 0);
        assert_eq!(second.rate, 0.0);
    }

    #[test]
    fn explicit_reset_clears_total() {
        let mut c = RateCounter::monotonic64();
        c.update(100, 1.0);
        c.update(600, 1.0);
        assert_eq!(c.accumulated(), 500);
        c.reset(42);
        assert_eq!(c.accumulated(), 0);
        assert_eq!(c.last_raw(), 42);
        assert_eq!(c.update(142, 1.0).delta, 100);
    }
}
