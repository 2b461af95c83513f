//! Progress reporting abstractions
//!
//! The provisioning steps report what they are doing through a trait, so the
//! core library stays free of terminal concerns. The CLI renders the updates;
//! tests and non-interactive runs use [`NullProvider`].

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Core trait for progress reporting
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);

    /// Signal that the operation is complete
    fn complete(&self);
}

/// Unified progress update type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// An upload is about to start (`index` is zero-based)
    UploadStarted {
        index: usize,
        total: usize,
        path: PathBuf,
    },

    /// An upload finished, successfully or not
    UploadFinished {
        index: usize,
        total: usize,
        path: PathBuf,
        success: bool,
    },

    /// Generic status message
    Status { message: String },
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {
        // No-op: discard all progress updates
    }

    fn complete(&self) {
        // No-op
    }
}

/// Provider that keeps every update, for assertions and summaries
#[derive(Default, Clone)]
pub struct RecordingProvider {
    updates: Arc<Mutex<Vec<ProgressUpdate>>>,
    completed: Arc<Mutex<bool>>,
}

impl RecordingProvider {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates received so far
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates
            .lock()
            .map(|updates| updates.clone())
            .unwrap_or_default()
    }

    /// Whether `complete` has been called
    pub fn is_complete(&self) -> bool {
        self.completed.lock().map(|done| *done).unwrap_or(false)
    }
}

impl ProgressProvider for RecordingProvider {
    fn report(&self, update: ProgressUpdate) {
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(update);
        }
    }

    fn complete(&self) {
        if let Ok(mut done) = self.completed.lock() {
            *done = true;
        }
    }
}
