//! The polling driver that ties raw collection to the sampling core.
//!
//! A [`Monitor`] owns the reader and all per-entity counter state, and is
//! the single writer of that state: each `refresh()` fetches raw values,
//! computes the elapsed time since the previous refresh, pushes everything
//! through the sampling core and returns an immutable [`SystemSnapshot`].
//! Single-threaded and synchronous; readers consume snapshots between
//! refresh calls.

use std::time::Instant;

use chrono::Utc;
use tracing::debug;

use crate::collector::procfs::CollectError;
use crate::collector::traits::FileSystem;
use crate::collector::SystemReader;
use crate::model::{InterfaceSnapshot, LoadSnapshot, MemorySnapshot, SystemSnapshot};
use crate::sampling::{CpuLoadTracker, NetRateStore, NetReading, SampleError, AGGREGATE_SLOT};

/// Error type for a failed refresh.
#[derive(Debug)]
pub enum MonitorError {
    /// A required raw value could not be fetched; the sample was skipped
    /// and all prior state is untouched.
    Collect(CollectError),
    /// Per-CPU state could not be allocated at first refresh. Fatal.
    Sample(SampleError),
}

impl From<CollectError> for MonitorError {
    fn from(e: CollectError) -> Self {
        MonitorError::Collect(e)
    }
}

impl From<SampleError> for MonitorError {
    fn from(e: SampleError) -> Self {
        MonitorError::Sample(e)
    }
}

impl std::fmt::Display for MonitorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorError::Collect(e) => write!(f, "Collection error: {}", e),
            MonitorError::Sample(e) => write!(f, "Sampling error: {}", e),
        }
    }
}

impl std::error::Error for MonitorError {}

/// Polling driver owning the reader and all counter state.
pub struct Monitor<F: FileSystem> {
    reader: SystemReader<F>,
    /// Sized on the first refresh, once the CPU count is known.
    /// A changed CPU count afterwards requires a new `Monitor`.
    cpu_loads: Option<CpuLoadTracker>,
    net: NetRateStore,
    last_sample: Option<Instant>,
}

impl<F: FileSystem> Monitor<F> {
    /// Creates a monitor reading through `reader`.
    pub fn new(reader: SystemReader<F>) -> Self {
        Self {
            reader,
            cpu_loads: None,
            net: NetRateStore::new(),
            last_sample: None,
        }
    }

    /// Number of CPUs enumerated at the first refresh, if it happened.
    pub fn cpu_count(&self) -> Option<usize> {
        self.cpu_loads.as_ref().map(|t| t.cpu_count())
    }

    /// Runs one refresh cycle, measuring elapsed time since the previous
    /// one with a monotonic clock.
    ///
    /// The first refresh only baselines the counters: all rates and
    /// fractions in the returned snapshot are zero.
    pub fn refresh(&mut self) -> Result<SystemSnapshot, MonitorError> {
        let now = Instant::now();
        let elapsed_secs = match self.last_sample {
            Some(prev) => now.duration_since(prev).as_secs_f64(),
            None => 0.0,
        };
        let snapshot = self.refresh_with_elapsed(elapsed_secs)?;
        // Only a completed refresh advances the clock; a skipped sample
        // keeps the previous instant so the next delta spans the gap.
        self.last_sample = Some(now);
        Ok(snapshot)
    }

    /// Runs one refresh cycle with a caller-supplied elapsed time.
    ///
    /// This is the deterministic entry point: tests and drivers with
    /// their own clock pass the interval explicitly.
    pub fn refresh_with_elapsed(
        &mut self,
        elapsed_secs: f64,
    ) -> Result<SystemSnapshot, MonitorError> {
        // CPU ticks are the one required fetch: without them there is no
        // sample. Everything else degrades to defaults.
        let cpus = self.reader.read_cpu_ticks()?;
        let enumerated = cpus.iter().filter(|c| c.cpu_id.is_some()).count();

        let tracker = match &mut self.cpu_loads {
            Some(t) => t,
            slot @ None => {
                debug!("enumerated {} CPUs", enumerated);
                slot.insert(CpuLoadTracker::new(enumerated)?)
            }
        };

        let mut cpu_usage = vec![0.0f32; tracker.slot_count()];
        for ticks in &cpus {
            let slot = match ticks.cpu_id {
                None => AGGREGATE_SLOT,
                Some(id) => id as usize + 1,
            };
            let fraction = tracker.sample_utilization(slot, ticks.used, ticks.total);
            if let Some(out) = cpu_usage.get_mut(slot) {
                *out = fraction;
            }
        }

        let mut interfaces = Vec::new();
        match self.reader.read_net_dev() {
            Ok(devices) => {
                for dev in devices {
                    let up = self.reader.interface_up(&dev.interface);
                    let reading = NetReading {
                        received: dev.rx_bytes,
                        transmitted: dev.tx_bytes,
                        up,
                        addr: None,
                    };
                    let sample = self.net.sample(&dev.interface, reading, elapsed_secs);
                    let (recv_total, trans_total) = self
                        .net
                        .get(&dev.interface)
                        .map(|s| (s.recv_total(), s.trans_total()))
                        .unwrap_or((0, 0));
                    interfaces.push(InterfaceSnapshot {
                        name: dev.interface,
                        up,
                        recv_speed: sample.recv_speed,
                        trans_speed: sample.trans_speed,
                        recv_total,
                        trans_total,
                    });
                }
            }
            Err(e) => {
                debug!("net/dev unavailable, skipping interfaces: {}", e);
            }
        }

        let memory = match self.reader.read_meminfo() {
            Ok(m) => MemorySnapshot {
                total_kb: m.mem_total,
                free_kb: m.mem_free,
                available_kb: m.mem_available,
                swap_total_kb: m.swap_total,
                swap_free_kb: m.swap_free,
            },
            Err(e) => {
                debug!("meminfo unavailable: {}", e);
                MemorySnapshot::default()
            }
        };

        let load = match self.reader.read_loadavg() {
            Ok(l) => LoadSnapshot {
                lavg1: l.load1 as f32,
                lavg5: l.load5 as f32,
                lavg15: l.load15 as f32,
                tasks_running: l.running,
                tasks_total: l.total,
            },
            Err(e) => {
                debug!("loadavg unavailable: {}", e);
                LoadSnapshot::default()
            }
        };

        let (processes_forked, processes_running) = match self.reader.read_task_counts() {
            Ok(counts) => counts,
            Err(e) => {
                debug!("task counts unavailable: {}", e);
                (0, 0)
            }
        };

        let uptime_secs = self.reader.read_uptime().unwrap_or(0);

        Ok(SystemSnapshot {
            timestamp: Utc::now().timestamp(),
            uptime_secs,
            memory,
            load,
            processes_forked,
            processes_running,
            cpu_usage,
            interfaces,
        })
    }
}
