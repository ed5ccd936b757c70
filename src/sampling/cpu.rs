//! CPU utilization tracking from used/total tick counter pairs.
//!
//! The kernel exposes cumulative tick counters per CPU state; utilization
//! over a sampling interval is the used-tick delta divided by the
//! total-tick delta. Slot 0 is reserved for the system-wide aggregate
//! counters, slots 1..=N hold the individually enumerated CPUs. Each slot
//! is sampled independently from its own kernel counters, so the per-core
//! fractions need not sum to the aggregate slot's value.

use crate::sampling::SampleError;

/// Reserved slot index for the system-wide aggregate entity.
pub const AGGREGATE_SLOT: usize = 0;

/// Previous used/total tick readings for one slot.
///
/// Both are non-wrapping 64-bit accumulators (the widest counter type the
/// platform exposes), so no overflow correction applies here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct CpuLoad {
    old_used: u64,
    old_total: u64,
}

/// Fixed-size store of per-slot tick state, sized once at initialization.
///
/// Resizing after construction is unsupported: if the CPU count changes
/// (hot-added CPU), the tracker must be rebuilt.
#[derive(Debug)]
pub struct CpuLoadTracker {
    loads: Vec<CpuLoad>,
}

impl CpuLoadTracker {
    /// Allocates state for `cpu_count` CPUs plus the aggregate slot.
    ///
    /// Fails with [`SampleError::Allocation`] if the storage cannot be
    /// obtained; the caller cannot continue without it.
    pub fn new(cpu_count: usize) -> Result<Self, SampleError> {
        let slots = cpu_count + 1;
        let mut loads = Vec::new();
        loads
            .try_reserve_exact(slots)
            .map_err(|_| SampleError::Allocation { slots })?;
        loads.resize(slots, CpuLoad::default());
        Ok(Self { loads })
    }

    /// Number of slots including the aggregate.
    pub fn slot_count(&self) -> usize {
        self.loads.len()
    }

    /// Number of tracked CPUs (excluding the aggregate slot).
    pub fn cpu_count(&self) -> usize {
        self.loads.len() - 1
    }

    /// Feeds one used/total tick reading for `slot` and returns the
    /// utilization fraction for the interval since the previous reading.
    ///
    /// A zero total-tick delta reports 0.0 (no new tick budget observed,
    /// assume idle). A regression of either counter is a reset and also
    /// reports 0.0. In every branch the stored readings are replaced with
    /// the new ones so drift does not accumulate. A slot outside the range
    /// fixed at construction reports 0.0 and stores nothing.
    pub fn sample_utilization(&mut self, slot: usize, new_used: u64, new_total: u64) -> f32 {
        let Some(load) = self.loads.get_mut(slot) else {
            return 0.0;
        };

        let fraction = if new_used < load.old_used || new_total < load.old_total {
            0.0
        } else {
            let diff_total = new_total - load.old_total;
            if diff_total == 0 {
                0.0
            } else {
                (new_used - load.old_used) as f32 / diff_total as f32
            }
        };

        load.old_used = new_used;
        load.old_total = new_total;
        fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The tracker baselines on the first sample; this fixture advances past it.
    fn primed_tracker(cpu_count: usize) -> CpuLoadTracker {
        let mut t = CpuLoadTracker::new(cpu_count).unwrap();
        for slot in 0..t.slot_count() {
            t.sample_utilization(slot, 100, 1000);
        }
        t
    }

    #[test]
    fn sizing_includes_aggregate_slot() {
        let t = CpuLoadTracker::new(4).unwrap();
        assert_eq!(t.slot_count(), 5);
        assert_eq!(t.cpu_count(), 4);
    }

    #[test]
    fn basic_utilization_fraction() {
        let mut t = primed_tracker(1);
        let f = t.sample_utilization(1, 150, 1200);
        assert!((f - 0.25).abs() < 1e-6);
    }

    #[test]
    fn zero_total_diff_reports_idle_but_rebaselines() {
        let mut t = primed_tracker(1);
        // Same total as the baseline: no tick budget observed.
        let f = t.sample_utilization(1, 120, 1000);
        assert_eq!(f, 0.0);
        // The readings were still replaced: the next delta starts from them.
        let f = t.sample_utilization(1, 170, 1100);
        assert!((f - 0.5).abs() < 1e-6);
    }

    #[test]
    fn counter_regression_rebaselines_with_zero() {
        let mut t = primed_tracker(1);
        let f = t.sample_utilization(1, 10, 50);
        assert_eq!(f, 0.0);
        let f = t.sample_utilization(1, 35, 150);
        assert!((f - 0.25).abs() < 1e-6);
    }

    #[test]
    fn slots_are_independent() {
        let mut t = primed_tracker(2);
        let before = t.loads[AGGREGATE_SLOT];
        t.sample_utilization(1, 600, 2000);
        assert_eq!(t.loads[AGGREGATE_SLOT], before);
        assert_eq!(t.loads[2], CpuLoad { old_used: 100, old_total: 1000 });
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut t = primed_tracker(1);
        assert_eq!(t.sample_utilization(7, 999, 9999), 0.0);
        assert_eq!(t.slot_count(), 2);
    }

    #[test]
    fn full_load_is_one() {
        let mut t = primed_tracker(1);
        let f = t.sample_utilization(1, 1100, 2000);
        assert!((f - 1.0).abs() < 1e-6);
    }
}
