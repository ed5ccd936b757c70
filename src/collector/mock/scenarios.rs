//! Pre-built mock filesystem scenarios for testing.
//!
//! `typical_system` and `typical_system_later` form a matched pair: the
//! second carries the same files with counters advanced by known deltas,
//! so differencing tests get deterministic rates.

use super::filesystem::MockFs;

impl MockFs {
    /// A 2-CPU system at rest: first sampling instant.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 5000 250 1500 40000 500 100 50 0 0 0
cpu1 5000 250 1500 40000 500 100 50 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );
        fs.add_file(
            "/proc/net/dev",
            "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 12345678     9876    0    0    0     0          0         0 12345678     9876    0    0    0     0       0          0
  eth0: 987654321   654321    5   10    0     0          0       100 123456789   456789    2    5    0     0       0          0
",
        );
        fs.add_file("/sys/class/net/eth0/operstate", "up\n");

        fs
    }

    /// The same system one sampling interval later.
    ///
    /// Tick deltas (used/total): aggregate 900/2000, cpu0 800/1000,
    /// cpu1 100/1000 — utilizations 0.45, 0.8 and 0.1. Byte deltas:
    /// eth0 rx +1048576, tx +524288; lo +1000 each way.
    pub fn typical_system_later() -> Self {
        let mut fs = Self::typical_system();

        fs.add_file(
            "/proc/stat",
            "\
cpu  10900 500 3000 81100 1000 200 100 0 0 0
cpu0 5800 250 1500 40200 500 100 50 0 0 0
cpu1 5100 250 1500 40900 500 100 50 0 0 0
intr 1001000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 510000
btime 1700000000
processes 10020
procs_running 3
procs_blocked 0
",
        );
        fs.add_file(
            "/proc/net/dev",
            "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 12346678     9886    0    0    0     0          0         0 12346678     9886    0    0    0     0       0          0
  eth0: 988702897   655321    5   10    0     0          0       100 123981077   457789    2    5    0     0       0          0
",
        );

        fs
    }
}
