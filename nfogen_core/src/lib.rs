//! NFO Generator Core Library
//!
//! Infers season, episode and title from directory and file names and turns
//! them into episode descriptor documents for media library indexers.

pub mod classifier;
pub mod descriptor;
pub mod episode;
pub mod error;
pub mod identifier;
pub mod sink;

// Re-export main types
pub use classifier::{DirectoryMatch, DirectoryRule, FileMatch, FileRule, NameClassifier};
pub use descriptor::{
    DECLARATION, DescriptorBuilder, DescriptorOptions, DescriptorSerializer, Element,
};
pub use episode::EpisodeRecord;
pub use error::{Error, Result};
pub use identifier::{HashAlgorithm, IdSource, IdentifierDeriver};
pub use sink::{DescriptorSink, FileSink};
