//! Parsers for `/proc` filesystem files.
//!
//! Pure functions that turn the text content of the various `/proc` files
//! into structured raw values. No differencing happens here; the sampling
//! core owns that. Designed to be easily testable with string inputs.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Cumulative tick counters for one `cpu` line of `/proc/stat`, already
/// folded into the used/total pair the utilization tracker consumes.
///
/// `total` sums the user, nice, system, idle, iowait, irq, softirq and
/// steal columns; `used` is everything but idle. Both are non-wrapping
/// 64-bit accumulators.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuTicks {
    /// `None` for the aggregate "cpu" line, `Some(n)` for "cpuN".
    pub cpu_id: Option<u32>,
    pub used: u64,
    pub total: u64,
}

/// Raw values from `/proc/stat`.
#[derive(Debug, Clone, Default)]
pub struct StatInfo {
    /// Aggregate line first, then per-CPU lines in file order.
    pub cpus: Vec<CpuTicks>,
    /// Total forks since boot.
    pub processes: u64,
    /// Tasks currently runnable.
    pub procs_running: u32,
}

/// Parses `/proc/stat` content.
pub fn parse_stat(content: &str) -> Result<StatInfo, ParseError> {
    let mut info = StatInfo::default();

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        if parts[0].starts_with("cpu") {
            let cpu_id = if parts[0] == "cpu" {
                None
            } else {
                parts[0].strip_prefix("cpu").and_then(|s| s.parse().ok())
            };

            let get_val =
                |idx: usize| -> u64 { parts.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };

            // user nice system idle iowait irq softirq steal
            let idle = get_val(4);
            let total: u64 = (1..=8).map(get_val).sum();

            info.cpus.push(CpuTicks {
                cpu_id,
                used: total - idle,
                total,
            });
        } else if parts[0] == "processes" {
            info.processes = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(0);
        } else if parts[0] == "procs_running" {
            info.procs_running = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(0);
        }
    }

    if info.cpus.is_empty() {
        return Err(ParseError::new("no cpu lines in stat"));
    }

    Ok(info)
}

/// Raw byte counters for one interface from `/proc/net/dev`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetDevCounters {
    /// Interface name (eth0, lo, ...).
    pub interface: String,
    /// Cumulative bytes received.
    pub rx_bytes: u64,
    /// Cumulative bytes transmitted.
    pub tx_bytes: u64,
}

/// Parses `/proc/net/dev` content.
///
/// Format:
/// Inter-|   Receive                                                |  Transmit
///  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
///    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
pub fn parse_net_dev(content: &str) -> Result<Vec<NetDevCounters>, ParseError> {
    let mut devices = Vec::new();

    for line in content.lines() {
        // Skip header lines
        if line.contains('|') || line.trim().is_empty() {
            continue;
        }

        let Some((name, values)) = line.split_once(':') else {
            continue;
        };

        let values: Vec<&str> = values.split_whitespace().collect();
        if values.len() < 16 {
            continue;
        }

        devices.push(NetDevCounters {
            interface: name.trim().to_string(),
            rx_bytes: values[0].parse().unwrap_or(0),
            tx_bytes: values[8].parse().unwrap_or(0),
        });
    }

    Ok(devices)
}

/// Raw values from `/proc/meminfo` (all in kB).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_available: u64,
    pub swap_total: u64,
    pub swap_free: u64,
}

/// Parses `/proc/meminfo` content.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut info = MemInfo::default();

    let parse_kb = |line: &str| -> u64 {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            info.mem_total = parse_kb(line);
        } else if line.starts_with("MemFree:") {
            info.mem_free = parse_kb(line);
        } else if line.starts_with("MemAvailable:") {
            info.mem_available = parse_kb(line);
        } else if line.starts_with("SwapTotal:") {
            info.swap_total = parse_kb(line);
        } else if line.starts_with("SwapFree:") {
            info.swap_free = parse_kb(line);
        }
    }

    Ok(info)
}

/// Raw values from `/proc/loadavg`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadAvg {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
    /// Tasks currently runnable.
    pub running: u32,
    /// Total tasks.
    pub total: u32,
}

/// Parses `/proc/loadavg` content.
pub fn parse_loadavg(content: &str) -> Result<LoadAvg, ParseError> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(ParseError::new("invalid loadavg format"));
    }

    let load1 = parts[0]
        .parse()
        .map_err(|_| ParseError::new("invalid load1"))?;
    let load5 = parts[1]
        .parse()
        .map_err(|_| ParseError::new("invalid load5"))?;
    let load15 = parts[2]
        .parse()
        .map_err(|_| ParseError::new("invalid load15"))?;

    // Format: running/total
    let (running, total) = if let Some((r, t)) = parts[3].split_once('/') {
        (r.parse().unwrap_or(0), t.parse().unwrap_or(0))
    } else {
        (0, 0)
    };

    Ok(LoadAvg {
        load1,
        load5,
        load15,
        running,
        total,
    })
}

/// Parses `/proc/uptime` content into whole seconds since boot.
pub fn parse_uptime(content: &str) -> Result<u64, ParseError> {
    let secs: f64 = content
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::new("empty uptime"))?
        .parse()
        .map_err(|_| ParseError::new("invalid uptime"))?;
    Ok(secs as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stat_folds_used_and_total() {
        let content = "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
";
        let info = parse_stat(content).unwrap();
        assert_eq!(info.cpus.len(), 3);

        let agg = info.cpus[0];
        assert_eq!(agg.cpu_id, None);
        assert_eq!(agg.total, 10000 + 500 + 3000 + 80000 + 1000 + 200 + 100);
        assert_eq!(agg.used, agg.total - 80000);

        assert_eq!(info.cpus[1].cpu_id, Some(0));
        assert_eq!(info.cpus[2].cpu_id, Some(1));
        assert_eq!(info.processes, 10000);
        assert_eq!(info.procs_running, 2);
    }

    #[test]
    fn parse_stat_without_cpu_lines_fails() {
        assert!(parse_stat("ctxt 500000\nbtime 1700000000\n").is_err());
    }

    #[test]
    fn parse_net_dev_extracts_byte_columns() {
        let content = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 12345678     9876    0    0    0     0          0         0 12345678     9876    0    0    0     0       0          0
  eth0: 987654321   654321    5   10    0     0          0       100 123456789   456789    2    5    0     0       0          0
";
        let devices = parse_net_dev(content).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].interface, "lo");
        assert_eq!(devices[0].rx_bytes, 12_345_678);
        assert_eq!(devices[1].interface, "eth0");
        assert_eq!(devices[1].rx_bytes, 987_654_321);
        assert_eq!(devices[1].tx_bytes, 123_456_789);
    }

    #[test]
    fn parse_net_dev_skips_malformed_lines() {
        let content = "garbage line\n  eth0: 1 2 3\n";
        let devices = parse_net_dev(content).unwrap();
        assert!(devices.is_empty());
    }

    #[test]
    fn parse_meminfo_basic() {
        let content = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
SwapTotal:       4096000 kB
SwapFree:        4095000 kB
";
        let info = parse_meminfo(content).unwrap();
        assert_eq!(info.mem_total, 16_384_000);
        assert_eq!(info.mem_free, 8_192_000);
        assert_eq!(info.mem_available, 12_000_000);
        assert_eq!(info.swap_total, 4_096_000);
        assert_eq!(info.swap_free, 4_095_000);
    }

    #[test]
    fn parse_loadavg_basic() {
        let load = parse_loadavg("0.15 0.10 0.05 1/150 1234\n").unwrap();
        assert!((load.load1 - 0.15).abs() < 1e-9);
        assert!((load.load5 - 0.10).abs() < 1e-9);
        assert!((load.load15 - 0.05).abs() < 1e-9);
        assert_eq!(load.running, 1);
        assert_eq!(load.total, 150);
    }

    #[test]
    fn parse_loadavg_rejects_short_input() {
        assert!(parse_loadavg("0.15 0.10\n").is_err());
    }

    #[test]
    fn parse_uptime_basic() {
        assert_eq!(parse_uptime("12345.67 98765.43\n").unwrap(), 12345);
        assert!(parse_uptime("").is_err());
    }
}
