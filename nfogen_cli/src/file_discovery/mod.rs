//! File discovery for descriptor generation
//!
//! Walks a media tree directory by directory, lists each directory's files in
//! sorted order and decides which of them are video containers that should
//! get a descriptor.

mod extensions;
mod filter;
mod walker;

pub use extensions::{DEFAULT_CONTAINER_EXTENSIONS, normalize_extension, split_extension};
pub use filter::{FileFilter, FileVerdict, PatternMatcher};
pub use walker::{DirectoryWalker, FileDiscoveryOptions};

use std::path::PathBuf;

/// A directory visited during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDirectory {
    /// Directory path as traversed (root joined with relative components)
    pub path: PathBuf,
    /// Base name used for season classification; empty for `.`
    pub name: String,
    /// Regular file names, sorted
    pub files: Vec<String>,
}

impl DiscoveredDirectory {
    /// Whether a file with exactly this name is present
    pub fn contains_file(&self, name: &str) -> bool {
        self.files.binary_search_by(|f| f.as_str().cmp(name)).is_ok()
    }
}

/// Error type for file discovery operations
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Result type for file discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_file_is_exact() {
        let dir = DiscoveredDirectory {
            path: PathBuf::from("."),
            name: String::new(),
            files: vec![
                "episode01.mkv".to_string(),
                "episode01.nfo".to_string(),
                "episode02.mkv".to_string(),
            ],
        };

        assert!(dir.contains_file("episode01.nfo"));
        assert!(!dir.contains_file("episode02.nfo"));
        assert!(!dir.contains_file("EPISODE01.nfo"));
    }
}
