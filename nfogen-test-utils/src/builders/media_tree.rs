//! Temporary media directory trees

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for a media tree rooted in a temporary directory
///
/// Paths are relative to the root; parent directories are created on build.
#[derive(Debug, Default)]
pub struct MediaTreeBuilder {
    directories: Vec<PathBuf>,
    files: Vec<(PathBuf, Vec<u8>)>,
}

impl MediaTreeBuilder {
    /// Create a new, empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty directory
    pub fn with_directory(mut self, path: impl AsRef<Path>) -> Self {
        self.directories.push(path.as_ref().to_path_buf());
        self
    }

    /// Add a placeholder video (or any other) file
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_file_content(path, b"test")
    }

    /// Add a file with explicit content
    pub fn with_file_content(mut self, path: impl AsRef<Path>, content: &[u8]) -> Self {
        self.files.push((path.as_ref().to_path_buf(), content.to_vec()));
        self
    }

    /// Materialise the tree on disk
    pub fn build(self) -> io::Result<MediaTree> {
        let root = TempDir::new()?;

        for directory in &self.directories {
            fs::create_dir_all(root.path().join(directory))?;
        }

        for (path, content) in &self.files {
            let full = root.path().join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(full, content)?;
        }

        Ok(MediaTree { root })
    }
}

/// A media tree on disk, removed when dropped
#[derive(Debug)]
pub struct MediaTree {
    root: TempDir,
}

impl MediaTree {
    /// Root directory of the tree
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of a tree-relative path
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Whether a tree-relative path exists
    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.join(relative).exists()
    }

    /// Read a tree-relative file as UTF-8 text
    pub fn read(&self, relative: impl AsRef<Path>) -> io::Result<String> {
        fs::read_to_string(self.join(relative))
    }
}
