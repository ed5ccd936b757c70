//! sysrate — stateful system counter sampling.
//!
//! Turns raw kernel counters (CPU ticks, interface byte counts) into
//! rates and utilization fractions by differencing consecutive samples.
//!
//! Provides:
//! - `sampling` — counter differencing kernels and per-entity rate state
//! - `collector` — /proc readers behind a `FileSystem` abstraction
//! - `monitor` — the sampling driver tying collection to rate state
//! - `model` — serializable snapshot types
//! - `fmt` — formatting helpers for log output

pub mod collector;
pub mod fmt;
pub mod model;
pub mod monitor;
pub mod sampling;
