//! Raw counter collection from the `/proc` filesystem.

pub mod parser;
pub mod system;

pub use parser::{CpuTicks, LoadAvg, MemInfo, NetDevCounters, ParseError, StatInfo};
pub use system::{CollectError, SystemReader};
