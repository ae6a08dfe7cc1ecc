//! Test utilities for the NFO generator
//!
//! This crate provides fixture builders for on-disk media trees and sink
//! implementations that capture or reject descriptor writes.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{MediaTree, MediaTreeBuilder};
pub use mocks::{FailingSink, MemorySink};
