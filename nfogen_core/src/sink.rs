//! Descriptor persistence
//!
//! The core hands finished documents to a [`DescriptorSink`]; what happens to
//! them afterwards is up to the implementation.

use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Destination for rendered descriptor documents
pub trait DescriptorSink {
    /// Store `document` at `path`, replacing any previous content
    fn persist(&mut self, path: &Path, document: &str) -> io::Result<()>;
}

/// Writes descriptors to the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSink;

impl DescriptorSink for FileSink {
    fn persist(&mut self, path: &Path, document: &str) -> io::Result<()> {
        debug!("Writing descriptor: {}", path.display());
        fs::write(path, document.as_bytes())
    }
}
