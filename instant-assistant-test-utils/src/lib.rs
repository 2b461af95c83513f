//! Test utilities for Instant Assistant
//!
//! Mock API clients and temporary directory fixtures shared by the core and
//! CLI test suites.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{MIB, TestTree, TestTreeBuilder, reference_fixture};
pub use mocks::MockAssistantApi;
