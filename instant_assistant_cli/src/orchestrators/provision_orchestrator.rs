//! Provision command orchestrator
//!
//! Runs a whole provisioning pass: scan the directory, upload what was
//! found, create the assistant and build its link.

use crate::progress::{create_progress_infrastructure, render_progress};
use anyhow::{Context, Result};
use indicatif::MultiProgress;
use instant_assistant_core::api::{AssistantApi, AssistantId, FileId};
use instant_assistant_core::progress::{NullProvider, ProgressProvider, ProgressUpdate};
use instant_assistant_core::provision::{
    FailedUpload, build_assistant_url, create_assistant, upload_files,
};
use instant_assistant_core::scan::{ScanConfig, SkippedFile, scan_detailed};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// What to create
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    pub name: String,
    pub instructions: String,
    pub model: String,
    pub show_progress: bool,
}

/// Everything a provisioning run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Files the scan selected, in scan order
    pub scanned: Vec<PathBuf>,
    /// Files the scan left out
    pub skipped: Vec<SkippedFile>,
    /// Whether the file limit cut the scan short
    pub truncated: bool,
    /// Uploaded files with their ids
    pub uploaded: Vec<(PathBuf, FileId)>,
    /// Files whose upload failed
    pub failed: Vec<FailedUpload>,
    pub assistant_id: AssistantId,
    pub assistant_url: String,
}

/// Orchestrator for the provision command
pub struct ProvisionOrchestrator<A: AssistantApi> {
    api: A,
    options: ProvisionOptions,
    progress_bars: MultiProgress,
}

impl<A: AssistantApi> ProvisionOrchestrator<A> {
    /// Create a new provision orchestrator
    pub fn new(api: A, options: ProvisionOptions) -> Self {
        debug!(
            "Creating provision orchestrator for assistant '{}' ({})",
            options.name, options.model
        );
        Self {
            api,
            options,
            progress_bars: MultiProgress::new(),
        }
    }

    /// Draw the upload bar into `bars` instead of a private group
    ///
    /// Pass the group the logger suspends so log lines and the bar do not
    /// overwrite each other.
    pub fn with_progress_bars(mut self, bars: MultiProgress) -> Self {
        self.progress_bars = bars;
        self
    }

    /// The API client this orchestrator talks to
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Scan `scan_config.root`, upload the files and create the assistant
    ///
    /// Upload failures are logged and left out. If assistant creation fails
    /// the uploaded files stay on the service.
    pub async fn run(&self, scan_config: &ScanConfig) -> Result<ProvisionReport> {
        let outcome = scan_detailed(scan_config);
        let found = outcome.files.len();
        info!("Found {found} files. Uploading to OpenAI...");

        let show_progress = self.options.show_progress && !outcome.is_empty();
        let (progress, progress_handle) = if show_progress {
            let (provider, rx) = create_progress_infrastructure();
            let bars = self.progress_bars.clone();
            (provider, Some(tokio::spawn(render_progress(rx, bars))))
        } else {
            (Arc::new(NullProvider) as Arc<dyn ProgressProvider>, None)
        };

        let summary = upload_files(&self.api, &outcome.files, progress.as_ref()).await;

        if !summary.failed.is_empty() {
            progress.report(ProgressUpdate::Status {
                message: format!("{} file(s) could not be uploaded", summary.failed.len()),
            });
        }

        // Signal completion so the renderer can exit its loop
        progress.complete();
        if let Some(handle) = progress_handle {
            wait_for_renderer(handle).await;
        }

        let assistant_id = create_assistant(
            &self.api,
            &self.options.name,
            &self.options.instructions,
            &self.options.model,
            summary.file_ids(),
        )
        .await
        .with_context(|| {
            format!(
                "Failed to create assistant '{}' ({} uploaded file(s) were kept)",
                self.options.name,
                summary.uploaded.len()
            )
        })?;
        warn!("Assistant created with ID {assistant_id}");

        let assistant_url = build_assistant_url(&assistant_id);
        info!("Assistant URL: {assistant_url}");

        Ok(ProvisionReport {
            scanned: outcome.files,
            skipped: outcome.skipped,
            truncated: outcome.truncated,
            uploaded: summary.uploaded,
            failed: summary.failed,
            assistant_id,
            assistant_url,
        })
    }
}

/// Wait for the render task; a crashed renderer must not fail the run
async fn wait_for_renderer(handle: JoinHandle<()>) {
    if let Err(e) = handle.await {
        debug!("Progress renderer stopped abnormally: {e}");
    }
}
