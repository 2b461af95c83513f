//! Progress provider implementation for CLI
//!
//! Bridges the core library's progress reporting with the CLI's rendering
//! task.

use instant_assistant_core::progress::{ProgressProvider, ProgressUpdate};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Channel-based progress provider for CLI rendering
///
/// Updates go through an unbounded channel to a separate rendering task, so
/// a slow terminal never holds up an upload and no update is lost.
pub struct ChannelProvider {
    tx: Mutex<Option<mpsc::UnboundedSender<ProgressUpdate>>>,
}

impl ChannelProvider {
    /// Create a new channel provider
    pub fn new(tx: mpsc::UnboundedSender<ProgressUpdate>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }

    fn sender(&self) -> Option<mpsc::UnboundedSender<ProgressUpdate>> {
        match self.tx.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProgressProvider for ChannelProvider {
    fn report(&self, update: ProgressUpdate) {
        // Fails only once the receiver is gone
        if let Some(tx) = self.sender() {
            let _ = tx.send(update);
        }
    }

    fn complete(&self) {
        // Drop our sender so the renderer can exit its loop
        let mut guard = match self.tx.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = None;
    }
}

/// Create a progress provider and the receiving end for its renderer
pub fn create_progress_infrastructure()
-> (Arc<dyn ProgressProvider>, mpsc::UnboundedReceiver<ProgressUpdate>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let provider = Arc::new(ChannelProvider::new(tx)) as Arc<dyn ProgressProvider>;
    (provider, rx)
}
