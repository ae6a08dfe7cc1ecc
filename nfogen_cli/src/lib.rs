//! NFO Generator CLI Library
//!
//! Configuration, media tree discovery, run orchestration and summary
//! output for the `nfogen` binary.

pub mod config;
pub mod error;
pub mod file_discovery;
pub mod orchestrators;
pub mod output;
pub mod paths;
