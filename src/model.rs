//! Snapshot model produced by one monitor refresh.
//!
//! These are plain serializable values: raw counters have already been
//! differenced into rates and fractions by the sampling core, so a
//! snapshot can be handed to any reporting layer without further state.

use serde::{Deserialize, Serialize};

/// Everything one refresh cycle produced.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct SystemSnapshot {
    /// Wall-clock time of the sample (unix seconds).
    pub timestamp: i64,
    /// Seconds since boot.
    pub uptime_secs: u64,
    /// Memory and swap usage.
    pub memory: MemorySnapshot,
    /// Load averages and task counts.
    pub load: LoadSnapshot,
    /// Total forks since boot, from `/proc/stat`.
    pub processes_forked: u64,
    /// Tasks in runnable state at the sampling instant, from `/proc/stat`.
    pub processes_running: u32,
    /// Utilization fraction in [0, 1] per slot.
    /// Slot 0 is the system-wide aggregate, slots 1..=N are per-CPU.
    pub cpu_usage: Vec<f32>,
    /// Per-interface byte rates, in `/proc/net/dev` order.
    pub interfaces: Vec<InterfaceSnapshot>,
}

/// Memory usage in kB, straight from `/proc/meminfo`.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct MemorySnapshot {
    pub total_kb: u64,
    pub free_kb: u64,
    pub available_kb: u64,
    pub swap_total_kb: u64,
    pub swap_free_kb: u64,
}

/// Load averages and task counts.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct LoadSnapshot {
    pub lavg1: f32,
    pub lavg5: f32,
    pub lavg15: f32,
    /// Tasks currently runnable.
    pub tasks_running: u32,
    /// Total tasks.
    pub tasks_total: u32,
}

/// Byte rates for one interface over the last sampling interval.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct InterfaceSnapshot {
    /// Interface name (eth0, lo, ...).
    pub name: String,
    /// Whether the interface was up for this sample.
    pub up: bool,
    /// Received bytes/second.
    pub recv_speed: f64,
    /// Transmitted bytes/second.
    pub trans_speed: f64,
    /// Total received bytes accumulated across counter wraps.
    pub recv_total: u64,
    /// Total transmitted bytes accumulated across counter wraps.
    pub trans_total: u64,
}
