//! Stable episode identifiers
//!
//! The identifier is a lowercase hex digest of a source string chosen by
//! [`IdSource`]. It is a cache key for media libraries, so the only
//! requirement is that the same inputs always give the same digest.

use crate::error::{Error, Result, ValidationError};
use log::warn;
use md5::{Digest as Md5Digest, Md5};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use std::path::{Component, Path, PathBuf};

/// Which string is hashed to form the identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdSource {
    /// Directory joined with the file name, as traversed
    #[default]
    Path,
    /// File name only
    Filename,
    /// Absolute form of [`IdSource::Path`]
    Absolute,
}

impl std::fmt::Display for IdSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdSource::Path => write!(f, "path"),
            IdSource::Filename => write!(f, "filename"),
            IdSource::Absolute => write!(f, "absolute"),
        }
    }
}

impl std::str::FromStr for IdSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "path" => Ok(IdSource::Path),
            "filename" => Ok(IdSource::Filename),
            "absolute" => Ok(IdSource::Absolute),
            _ => Err(ValidationError::invalid_parameter(
                "source",
                &format!("unknown identifier source '{s}' (expected path, filename or absolute)"),
            )
            .into()),
        }
    }
}

/// Digest used for identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// MD5 hash algorithm
    #[default]
    #[serde(rename = "md5")]
    MD5,
    /// SHA1 hash algorithm
    #[serde(rename = "sha1")]
    SHA1,
}

impl HashAlgorithm {
    /// Hash in-memory data to a lowercase hex string
    pub fn hash_bytes(&self, data: &[u8]) -> String {
        match self {
            HashAlgorithm::MD5 => format!("{:x}", Md5::digest(data)),
            HashAlgorithm::SHA1 => format!("{:x}", Sha1::digest(data)),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::MD5 => write!(f, "md5"),
            HashAlgorithm::SHA1 => write!(f, "sha1"),
        }
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::MD5),
            "sha1" => Ok(HashAlgorithm::SHA1),
            _ => Err(ValidationError::invalid_parameter(
                "algorithm",
                &format!("unsupported hash algorithm '{s}' (expected md5 or sha1)"),
            )
            .into()),
        }
    }
}

/// Derives identifiers under a fixed source policy and algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentifierDeriver {
    source: IdSource,
    algorithm: HashAlgorithm,
}

impl IdentifierDeriver {
    pub fn new(source: IdSource, algorithm: HashAlgorithm) -> Self {
        Self { source, algorithm }
    }

    /// Build the string that gets hashed
    ///
    /// `extension` includes its leading dot.
    pub fn source_string(&self, directory: &Path, base_name: &str, extension: &str) -> String {
        let file_name = format!("{base_name}{extension}");

        match self.source {
            IdSource::Filename => file_name,
            IdSource::Path => directory.join(&file_name).to_string_lossy().into_owned(),
            IdSource::Absolute => {
                let joined = directory.join(&file_name);
                match std::path::absolute(&joined) {
                    Ok(absolute) => normalize(&absolute).to_string_lossy().into_owned(),
                    Err(e) => {
                        warn!(
                            "Cannot resolve absolute path for {}: {e}; using it as given",
                            joined.display()
                        );
                        joined.to_string_lossy().into_owned()
                    }
                }
            }
        }
    }

    /// Derive the identifier for a file
    pub fn derive(&self, directory: &Path, base_name: &str, extension: &str) -> String {
        let source = self.source_string(directory, base_name, extension);
        self.algorithm.hash_bytes(source.as_bytes())
    }
}

/// Lexically fold `.` and `..` components without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
