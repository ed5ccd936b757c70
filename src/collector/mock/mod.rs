//! Mock filesystem and fixtures for testing without real `/proc`.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
