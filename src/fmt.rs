//! Formatting helpers for log output.
//!
//! Pure string formatting only; no state, no units math beyond display.

/// Format a byte count as a compact human-readable size ("1.5G", "512B").
pub fn format_bytes(bytes: u64) -> String {
    let f = bytes as f64;
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1}G", f / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.1}M", f / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1}K", f / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}

/// Format a bytes-per-second rate ("1.5G/s", "0" below one byte/second).
pub fn format_bytes_rate(rate: f64) -> String {
    if rate < 1.0 {
        return "0".to_string();
    }
    if rate >= 1024.0 * 1024.0 * 1024.0 {
        format!("{:.1}G/s", rate / (1024.0 * 1024.0 * 1024.0))
    } else if rate >= 1024.0 * 1024.0 {
        format!("{:.1}M/s", rate / (1024.0 * 1024.0))
    } else if rate >= 1024.0 {
        format!("{:.1}K/s", rate / 1024.0)
    } else {
        format!("{:.0}B/s", rate)
    }
}

/// Format a utilization fraction as a percentage ("12.3%").
pub fn format_fraction(fraction: f32) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Format seconds since boot as a compact duration ("3d4h", "5m10s").
pub fn format_uptime(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d{}h", secs / 86400, (secs % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_pick_the_right_suffix() {
        assert_eq!(format_bytes(512), "512B");
        assert_eq!(format_bytes(2048), "2.0K");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0M");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.0G");
    }

    #[test]
    fn rates_round_below_one_to_zero() {
        assert_eq!(format_bytes_rate(0.5), "0");
        assert_eq!(format_bytes_rate(100.0), "100B/s");
        assert_eq!(format_bytes_rate(1536.0), "1.5K/s");
        assert_eq!(format_bytes_rate(104_857.6), "102.4K/s");
    }

    #[test]
    fn fraction_as_percent() {
        assert_eq!(format_fraction(0.0), "0.0%");
        assert_eq!(format_fraction(0.453), "45.3%");
        assert_eq!(format_fraction(1.0), "100.0%");
    }

    #[test]
    fn uptime_compact() {
        assert_eq!(format_uptime(42), "42s");
        assert_eq!(format_uptime(310), "5m10s");
        assert_eq!(format_uptime(12345), "3h25m");
        assert_eq!(format_uptime(273_600), "3d4h");
    }
}
