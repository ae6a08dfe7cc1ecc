//! In-memory descriptor sinks

use nfogen_core::DescriptorSink;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Sink that keeps every persisted document in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: BTreeMap<PathBuf, String>,
    writes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document last persisted at `path`
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.documents.get(path).map(String::as_str)
    }

    /// Paths of persisted documents, sorted
    pub fn paths(&self) -> Vec<&Path> {
        self.documents.keys().map(PathBuf::as_path).collect()
    }

    /// Number of successful `persist` calls, rewrites included
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DescriptorSink for MemorySink {
    fn persist(&mut self, path: &Path, document: &str) -> io::Result<()> {
        self.documents
            .insert(path.to_path_buf(), document.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Sink that rejects writes to selected file names
///
/// Other writes are forwarded to an inner [`MemorySink`].
#[derive(Debug, Default)]
pub struct FailingSink {
    failing_names: BTreeSet<String>,
    fail_all: bool,
    inner: MemorySink,
}

impl FailingSink {
    /// Sink that fails every write
    pub fn always() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    /// Sink that fails writes whose file name is in `names`
    pub fn for_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failing_names: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Writes that went through
    pub fn accepted(&self) -> &MemorySink {
        &self.inner
    }

    fn should_fail(&self, path: &Path) -> bool {
        self.fail_all
            || path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| self.failing_names.contains(n))
    }
}

impl DescriptorSink for FailingSink {
    fn persist(&mut self, path: &Path, document: &str) -> io::Result<()> {
        if self.should_fail(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("simulated write failure for {}", path.display()),
            ));
        }
        self.inner.persist(path, document)
    }
}
