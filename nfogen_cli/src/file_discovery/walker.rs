//! Directory walker module for file discovery
//!
//! Yields one [`DiscoveredDirectory`] per directory under the root, in sorted
//! depth-first order, each carrying its sorted file listing.

use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::{DiscoveredDirectory, DiscoveryError, PatternMatcher, Result};

/// Options for file discovery
#[derive(Debug, Clone, Default)]
pub struct FileDiscoveryOptions {
    /// Directory patterns to prune (glob patterns, relative to the root)
    pub exclude_patterns: Vec<String>,
    /// Follow symbolic links
    pub follow_links: bool,
    /// Maximum directory depth below the root (None = unlimited, 0 = root only)
    pub max_depth: Option<usize>,
}

impl FileDiscoveryOptions {
    /// Create new options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Add exclude patterns
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum depth for recursive search
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Streaming directory enumeration
pub struct DirectoryWalker {
    walker: Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>,
    follow_links: bool,
}

impl DirectoryWalker {
    /// Create a new walker rooted at `root`
    pub fn new(root: &Path, options: FileDiscoveryOptions) -> Result<Self> {
        if !root.exists() {
            return Err(DiscoveryError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
        }

        let exclude = if options.exclude_patterns.is_empty() {
            None
        } else {
            Some(PatternMatcher::new(&options.exclude_patterns)?)
        };

        let mut walker = WalkDir::new(root)
            .follow_links(options.follow_links)
            .sort_by_file_name();
        if let Some(depth) = options.max_depth {
            walker = walker.max_depth(depth);
        }

        let root_path = root.to_path_buf();
        let entries = walker.into_iter().filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            match (&exclude, entry.path().strip_prefix(&root_path)) {
                (Some(matcher), Ok(relative)) if matcher.matches(relative) => {
                    debug!("Excluded directory: {}", entry.path().display());
                    false
                }
                _ => true,
            }
        });

        Ok(Self {
            walker: Box::new(entries),
            follow_links: options.follow_links,
        })
    }

    /// Sorted regular file names directly inside `directory`
    fn list_files(&self, directory: &Path) -> Vec<String> {
        let listing = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        let mut files = Vec::new();
        for entry in listing {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Cannot read entry in {}: {e}", directory.display());
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => files.push(name.to_string()),
                None => debug!("Skipping non-UTF-8 file name: {}", entry.path().display()),
            }
        }

        files.sort();
        files
    }
}

impl Iterator for DirectoryWalker {
    type Item = DiscoveredDirectory;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if !entry.file_type().is_dir() {
                        continue;
                    }
                    let path: PathBuf = entry.path().to_path_buf();
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let files = self.list_files(&path);
                    return Some(DiscoveredDirectory { path, name, files });
                }
                Err(e) => {
                    // Log walk errors but continue
                    warn!("Walk error: {e}");
                    continue;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_directory() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::write(base.join("b.mkv"), b"test").unwrap();
        fs::write(base.join("a.mkv"), b"test").unwrap();

        let season = base.join("Season 01");
        fs::create_dir(&season).unwrap();
        fs::write(season.join("1x02. Second.mkv"), b"test").unwrap();
        fs::write(season.join("1x01. First.mkv"), b"test").unwrap();
        fs::create_dir(season.join("nested")).unwrap();

        let extras = base.join("Extras");
        fs::create_dir(&extras).unwrap();
        fs::write(extras.join("clip.mkv"), b"test").unwrap();

        dir
    }

    #[test]
    fn test_walker_yields_sorted_directories_and_files() {
        let dir = create_test_directory();
        let walked: Vec<_> = DirectoryWalker::new(dir.path(), FileDiscoveryOptions::new())
            .unwrap()
            .collect();

        let names: Vec<_> = walked.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(&names[1..], ["Extras", "Season 01", "nested"]);

        assert_eq!(walked[0].path, dir.path());
        assert_eq!(walked[0].files, vec!["a.mkv", "b.mkv"]);
        assert_eq!(walked[2].files, vec!["1x01. First.mkv", "1x02. Second.mkv"]);
        assert!(walked[3].files.is_empty());
    }

    #[test]
    fn test_walker_max_depth() {
        let dir = create_test_directory();
        let options = FileDiscoveryOptions::new().with_max_depth(Some(0));
        let walked: Vec<_> = DirectoryWalker::new(dir.path(), options).unwrap().collect();

        assert_eq!(walked.len(), 1);
        assert_eq!(walked[0].files, vec!["a.mkv", "b.mkv"]);
    }

    #[test]
    fn test_walker_prunes_excluded_directories() {
        let dir = create_test_directory();
        let options =
            FileDiscoveryOptions::new().with_exclude_patterns(vec!["Extras".to_string()]);
        let walked: Vec<_> = DirectoryWalker::new(dir.path(), options).unwrap().collect();

        assert!(walked.iter().all(|d| d.name != "Extras"));
        assert!(walked.iter().any(|d| d.name == "Season 01"));
    }

    #[test]
    fn test_walker_missing_root() {
        let dir = TempDir::new().unwrap();
        let result = DirectoryWalker::new(&dir.path().join("missing"), FileDiscoveryOptions::new());
        assert!(matches!(result, Err(DiscoveryError::PathNotFound(_))));
    }

    #[test]
    fn test_walker_root_must_be_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.mkv");
        fs::write(&file, b"test").unwrap();

        let result = DirectoryWalker::new(&file, FileDiscoveryOptions::new());
        assert!(matches!(result, Err(DiscoveryError::NotADirectory(_))));
    }
}
