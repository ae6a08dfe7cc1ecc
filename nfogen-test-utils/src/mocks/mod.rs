//! Mock implementations for testing

mod sink;

pub use sink::{FailingSink, MemorySink};
