//! Raw counter collection for Linux.
//!
//! This layer fetches undifferenced counter values from the `/proc` and
//! `/sys` filesystems through the `FileSystem` trait, with an in-memory
//! mock for testing off-Linux and in CI.
//!
//! ```text
//!        ┌──────────────────┐
//!        │  SystemReader    │  /proc/stat, /proc/net/dev,
//!        │                  │  /proc/meminfo, /proc/loadavg, ...
//!        └────────┬─────────┘
//!                 │
//!          ┌──────▼──────┐
//!          │  FileSystem │ (trait)
//!          └──────┬──────┘
//!        ┌────────┼────────┐
//!   ┌────▼────┐       ┌────▼────┐
//!   │ RealFs  │       │ MockFs  │
//!   │ (Linux) │       │ (tests) │
//!   └─────────┘       └─────────┘
//! ```

pub mod mock;
pub mod procfs;
pub mod traits;

pub use mock::MockFs;
pub use procfs::{CollectError, SystemReader};
pub use traits::{FileSystem, RealFs};
