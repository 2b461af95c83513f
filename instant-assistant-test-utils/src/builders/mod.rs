//! Builders for test scenarios

mod tree;

pub use tree::{MIB, TestTree, TestTreeBuilder, reference_fixture};
