//! Instant Assistant command line library
//!
//! Exposes the pieces the binary wires together so they can be tested on
//! their own.

pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrators;
pub mod progress;
pub mod terminal;

pub use config::{AppConfig, ConfigManager, ScanSettings};
pub use error::{CliError, CliResult, ErrorContext, ExitCode};
pub use orchestrators::{ProvisionOptions, ProvisionOrchestrator, ProvisionReport};
