//! Builders for test fixtures

mod media_tree;

pub use media_tree::{MediaTree, MediaTreeBuilder};
