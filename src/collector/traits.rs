//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait lets the reader work with both the real `/proc`
//! and `/sys` trees on Linux and an in-memory mock in tests and CI.

use std::io;
use std::path::Path;

/// Abstraction for the filesystem operations the collectors need.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn real_fs_reads_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cpu  1 2 3 4").unwrap();

        let fs = RealFs::new();
        let content = fs.read_to_string(file.path()).unwrap();
        assert!(content.contains("cpu"));
        assert!(fs.exists(file.path()));
    }

    #[test]
    fn real_fs_missing_path() {
        let fs = RealFs::new();
        assert!(!fs.exists(Path::new("/nonexistent/path/12345")));
        assert!(
            fs.read_to_string(Path::new("/nonexistent/path/12345"))
                .is_err()
        );
    }
}
