//! Command orchestrators for business logic
//!
//! Orchestrators coordinate between the CLI layer and the core library.

pub mod provision_orchestrator;

pub use provision_orchestrator::{ProvisionOptions, ProvisionOrchestrator, ProvisionReport};
