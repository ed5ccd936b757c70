//! sysrated - System rate sampling daemon.
//!
//! Periodically samples kernel counters from /proc, differences them into
//! CPU utilization fractions and per-interface byte rates, and logs a
//! one-line summary each cycle.

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use sysrate::collector::{RealFs, SystemReader};
use sysrate::fmt::{format_bytes, format_bytes_rate, format_fraction, format_uptime};
use sysrate::model::SystemSnapshot;
use sysrate::monitor::Monitor;

/// System rate sampling daemon.
#[derive(Parser)]
#[command(name = "sysrated", about = "System rate sampling daemon", version)]
struct Args {
    /// Sampling interval in seconds.
    #[arg(short, long, default_value = "10")]
    interval: u64,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Stop after this many samples. Runs until interrupted if unset.
    #[arg(short, long)]
    count: Option<u64>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for directive in [
        format!("sysrated={}", level),
        format!("sysrate={}", level),
    ] {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("invalid log directive '{}': {}", directive, e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Describes a snapshot for the per-cycle log line.
fn describe_snapshot(snapshot: &SystemSnapshot) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(total) = snapshot.cpu_usage.first() {
        parts.push(format!("cpu {}", format_fraction(*total)));
    }

    if snapshot.memory.total_kb > 0 {
        let used_kb = snapshot
            .memory
            .total_kb
            .saturating_sub(snapshot.memory.available_kb);
        parts.push(format!(
            "mem {}/{}",
            format_bytes(used_kb * 1024),
            format_bytes(snapshot.memory.total_kb * 1024)
        ));
    }

    parts.push(format!(
        "load {:.2} {:.2} {:.2}",
        snapshot.load.lavg1, snapshot.load.lavg5, snapshot.load.lavg15
    ));

    for iface in &snapshot.interfaces {
        if !iface.up {
            continue;
        }
        parts.push(format!(
            "{} rx {} tx {}",
            iface.name,
            format_bytes_rate(iface.recv_speed),
            format_bytes_rate(iface.trans_speed)
        ));
    }

    parts.push(format!("up {}", format_uptime(snapshot.uptime_secs)));

    parts.join(" | ")
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("sysrated {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}s, proc={}",
        args.interval, args.proc_path
    );

    let reader = SystemReader::new(RealFs::new(), &args.proc_path);
    if !reader.proc_available() {
        error!("{}/stat not found; cannot sample", args.proc_path);
        std::process::exit(1);
    }
    let mut monitor = Monitor::new(reader);

    let interval = Duration::from_secs(args.interval);

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    info!("Starting sampling loop");

    let mut sample_count: u64 = 0;

    while running.load(Ordering::SeqCst) {
        match monitor.refresh() {
            Ok(snapshot) => {
                sample_count += 1;
                info!("Sample #{}: {}", sample_count, describe_snapshot(&snapshot));
            }
            Err(e) => {
                error!("Failed to sample: {}", e);
            }
        }

        if let Some(count) = args.count
            && sample_count >= count
        {
            info!("Reached sample limit ({})", count);
            break;
        }

        // Sleep in small increments so shutdown stays responsive
        let mut remaining = interval;
        while !remaining.is_zero() && running.load(Ordering::SeqCst) {
            let step = remaining.min(Duration::from_millis(100));
            std::thread::sleep(step);
            remaining -= step;
        }
    }

    info!("Shutdown complete ({} samples)", sample_count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysrate::model::{InterfaceSnapshot, MemorySnapshot};

    #[test]
    fn summary_line_covers_cpu_mem_and_interfaces() {
        let snapshot = SystemSnapshot {
            uptime_secs: 310,
            memory: MemorySnapshot {
                total_kb: 16_384_000,
                available_kb: 8_192_000,
                ..Default::default()
            },
            cpu_usage: vec![0.45, 0.8, 0.1],
            interfaces: vec![InterfaceSnapshot {
                name: "eth0".to_string(),
                up: true,
                recv_speed: 104_857.6,
                trans_speed: 52_428.8,
                ..Default::default()
            }],
            ..Default::default()
        };

        let line = describe_snapshot(&snapshot);
        assert!(line.contains("cpu 45.0%"));
        assert!(line.contains("mem 7.8G/15.6G"));
        assert!(line.contains("eth0 rx 102.4K/s tx 51.2K/s"));
        assert!(line.contains("up 5m10s"));
    }

    #[test]
    fn summary_line_skips_down_interfaces_and_empty_memory() {
        let snapshot = SystemSnapshot {
            interfaces: vec![InterfaceSnapshot {
                name: "eth0".to_string(),
                up: false,
                ..Default::default()
            }],
            ..Default::default()
        };

        let line = describe_snapshot(&snapshot);
        assert!(!line.contains("mem"));
        assert!(!line.contains("eth0"));
    }
}
