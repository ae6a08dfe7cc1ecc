//! File filtering
//!
//! Decides per file name whether a descriptor should be generated, using the
//! container allow-list, the descriptor extension and exclude globs.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;

use super::extensions::{normalize_extension, split_extension};
use super::{DiscoveryError, Result};

/// Pattern matcher using GlobSet for efficient matching
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    globset: GlobSet,
}

impl PatternMatcher {
    /// Create a new pattern matcher from glob patterns
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| DiscoveryError::InvalidPattern(format!("{pattern}: {e}")))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| DiscoveryError::InvalidPattern(e.to_string()))?;

        Ok(Self { globset })
    }

    /// Check if a path matches any of the patterns
    pub fn matches(&self, path: &Path) -> bool {
        self.globset.is_match(path)
    }
}

/// Why a file was or was not selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileVerdict<'a> {
    /// A container file; `extension` is lowercased and has no dot
    Candidate { base: &'a str, extension: String },
    /// No extension, as with `readme` or a bare `.hidden`
    NoExtension,
    /// Already a descriptor
    Descriptor,
    /// Extension is not a known container
    Unsupported,
    /// Matched an exclude pattern
    Excluded,
}

/// File filter over container extensions and exclude patterns
#[derive(Debug, Clone)]
pub struct FileFilter {
    containers: HashSet<String>,
    descriptor_extension: String,
    exclude_matcher: Option<PatternMatcher>,
}

impl FileFilter {
    /// Create a new file filter
    pub fn new(
        containers: &[String],
        descriptor_extension: &str,
        exclude_patterns: &[String],
    ) -> Result<Self> {
        let exclude_matcher = if !exclude_patterns.is_empty() {
            Some(PatternMatcher::new(exclude_patterns)?)
        } else {
            None
        };

        Ok(Self {
            containers: containers
                .iter()
                .map(|c| normalize_extension(c))
                .filter(|c| !c.is_empty())
                .collect(),
            descriptor_extension: normalize_extension(descriptor_extension),
            exclude_matcher,
        })
    }

    /// Descriptor extension without the dot
    pub fn descriptor_extension(&self) -> &str {
        &self.descriptor_extension
    }

    /// Check a path (relative to the scan root) against the exclude patterns
    pub fn is_excluded(&self, relative_path: &Path) -> bool {
        self.exclude_matcher
            .as_ref()
            .is_some_and(|m| m.matches(relative_path))
    }

    /// Classify a file by name
    ///
    /// Rules, first hit wins:
    /// 1. No extension or dotfile -> NoExtension
    /// 2. Descriptor extension -> Descriptor
    /// 3. Extension not in the container list -> Unsupported
    /// 4. Path matches an exclude pattern -> Excluded
    /// 5. Otherwise -> Candidate
    pub fn check<'a>(&self, relative_path: &Path, name: &'a str) -> FileVerdict<'a> {
        let Some((base, extension)) = split_extension(name) else {
            return FileVerdict::NoExtension;
        };

        let extension = extension.to_lowercase();
        if extension == self.descriptor_extension {
            return FileVerdict::Descriptor;
        }

        if !self.containers.contains(&extension) {
            return FileVerdict::Unsupported;
        }

        if self.is_excluded(relative_path) {
            return FileVerdict::Excluded;
        }

        FileVerdict::Candidate { base, extension }
    }
}
