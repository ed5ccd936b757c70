//! System reader for fetching raw counter values from `/proc` and `/sys`.
//!
//! Returns undifferenced readings only; turning them into rates is the
//! sampling core's job.

use std::io;
use std::path::Path;

use crate::collector::procfs::parser::{
    CpuTicks, LoadAvg, MemInfo, NetDevCounters, parse_loadavg, parse_meminfo, parse_net_dev,
    parse_stat, parse_uptime,
};
use crate::collector::traits::FileSystem;

/// Error type for raw value collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading a `/proc` or `/sys` file.
    Io(io::Error),
    /// File content could not be parsed.
    Parse(String),
}

impl From<io::Error> for CollectError {
    fn from(e: io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {}

/// Fetches raw system-wide counter values.
pub struct SystemReader<F: FileSystem> {
    fs: F,
    proc_path: String,
    sys_path: String,
}

impl<F: FileSystem> SystemReader<F> {
    /// Creates a new reader.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            sys_path: "/sys".to_string(),
        }
    }

    /// Overrides the base path to the sys filesystem (for testing).
    pub fn with_sys_path(mut self, sys_path: impl Into<String>) -> Self {
        self.sys_path = sys_path.into();
        self
    }

    /// Whether the proc filesystem is present at the configured path.
    ///
    /// Checked once at startup so a misconfigured path fails fast
    /// instead of erroring on every cycle.
    pub fn proc_available(&self) -> bool {
        let path = format!("{}/stat", self.proc_path);
        self.fs.exists(Path::new(&path))
    }

    /// Reads cumulative CPU tick counters from `/proc/stat`.
    ///
    /// First element is the aggregate, rest are per-CPU in file order.
    pub fn read_cpu_ticks(&self) -> Result<Vec<CpuTicks>, CollectError> {
        let path = format!("{}/stat", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        let info = parse_stat(&content).map_err(|e| CollectError::Parse(e.message))?;
        Ok(info.cpus)
    }

    /// Reads task counts: (forks since boot, currently runnable).
    pub fn read_task_counts(&self) -> Result<(u64, u32), CollectError> {
        let path = format!("{}/stat", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        let info = parse_stat(&content).map_err(|e| CollectError::Parse(e.message))?;
        Ok((info.processes, info.procs_running))
    }

    /// Reads cumulative per-interface byte counters from `/proc/net/dev`.
    pub fn read_net_dev(&self) -> Result<Vec<NetDevCounters>, CollectError> {
        let path = format!("{}/net/dev", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        parse_net_dev(&content).map_err(|e| CollectError::Parse(e.message))
    }

    /// Reads memory usage from `/proc/meminfo`.
    pub fn read_meminfo(&self) -> Result<MemInfo, CollectError> {
        let path = format!("{}/meminfo", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        parse_meminfo(&content).map_err(|e| CollectError::Parse(e.message))
    }

    /// Reads load averages from `/proc/loadavg`.
    pub fn read_loadavg(&self) -> Result<LoadAvg, CollectError> {
        let path = format!("{}/loadavg", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        parse_loadavg(&content).map_err(|e| CollectError::Parse(e.message))
    }

    /// Reads seconds since boot from `/proc/uptime`.
    pub fn read_uptime(&self) -> Result<u64, CollectError> {
        let path = format!("{}/uptime", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        parse_uptime(&content).map_err(|e| CollectError::Parse(e.message))
    }

    /// Reports whether an interface is administratively up, from
    /// `/sys/class/net/<name>/operstate`.
    ///
    /// A missing operstate file (loopback often reports "unknown", some
    /// virtual interfaces have no entry at all) is treated as up; only an
    /// explicit "down" marks the interface inactive.
    pub fn interface_up(&self, name: &str) -> bool {
        let path = format!("{}/class/net/{}/operstate", self.sys_path, name);
        match self.fs.read_to_string(Path::new(&path)) {
            Ok(state) => state.trim() != "down",
            Err(_) => true,
        }
    }
}
