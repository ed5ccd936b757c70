//! Stateful counter sampling core.
//!
//! Turns monotonically increasing, possibly-wrapping kernel counters into
//! per-interval deltas, rates and utilization fractions:
//!
//! - [`delta`] — generic two-sample differencing with overflow correction
//! - [`cpu`] — used/total tick pairs into utilization fractions, with a
//!   reserved aggregate slot
//! - [`net`] — per-interface wrapping byte counters into bytes/second
//!
//! All state is owned by the trackers and mutated only during a sample
//! call; there is no shared mutable state and no background activity.
//! Recoverable oddities (unknown entity, counter reset, degenerate
//! interval) are absorbed into defined fallback values; only allocation
//! failure at initialization surfaces as an error.

pub mod cpu;
pub mod delta;
pub mod net;

pub use cpu::{AGGREGATE_SLOT, CpuLoadTracker};
pub use delta::{
    BYTE_COUNTER_WRAP_MAX, CounterUpdate, CounterWidth, MIN_SAMPLE_INTERVAL_SECS, RateCounter,
    monotonic_delta, wrapping_delta,
};
pub use net::{InterfaceRates, NetRateStore, NetReading, NetSample};

/// Error type for the sampling core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// Per-entity state storage could not be allocated at initialization.
    /// Fatal: the caller cannot continue without it.
    Allocation {
        /// Number of slots that could not be allocated.
        slots: usize,
    },
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::Allocation { slots } => {
                write!(f, "failed to allocate state for {} entity slots", slots)
            }
        }
    }
}

impl std::error::Error for SampleError {}
