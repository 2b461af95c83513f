//! Progress rendering for the CLI
//!
//! Turns upload updates into a single indicatif bar on stderr. The bar lives
//! in a `MultiProgress` shared with the logger, which hides it while a log
//! line is written.

use super::utils::format_elapsed;
use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use instant_assistant_core::progress::ProgressUpdate;
use std::path::Path;
use std::time::Instant;
use tokio::sync::mpsc;

/// Render progress updates from a channel until every sender is gone
pub async fn render_progress(mut rx: mpsc::UnboundedReceiver<ProgressUpdate>, bars: MultiProgress) {
    let mut renderer = ProgressRenderer::new(bars);

    while let Some(update) = rx.recv().await {
        renderer.handle_update(update);
    }

    renderer.finish();
}

/// Progress renderer for the upload loop
pub struct ProgressRenderer {
    upload_bar: Option<ProgressBar>,
    bars: MultiProgress,
    uploaded: usize,
    failed: usize,
    start_time: Instant,
}

impl ProgressRenderer {
    /// Create a renderer that adds its bar to `bars`
    pub fn new(bars: MultiProgress) -> Self {
        Self {
            upload_bar: None,
            bars,
            uploaded: 0,
            failed: 0,
            start_time: Instant::now(),
        }
    }

    /// Files uploaded so far
    pub fn uploaded(&self) -> usize {
        self.uploaded
    }

    /// Files that failed so far
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Handle a progress update
    pub fn handle_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::UploadStarted { index, total, path } => {
                let bar = self.upload_bar(total);
                bar.set_position(index as u64);
                let name = file_name(&path);
                bar.set_message(format!("{}: {}", "Uploading".bold(), name.cyan()));
            }

            ProgressUpdate::UploadFinished {
                index,
                total,
                path,
                success,
            } => {
                if success {
                    self.uploaded += 1;
                } else {
                    self.failed += 1;
                    let bar = self.upload_bar(total);
                    bar.println(format!("{} {}", "✗".red(), path.display()));
                }
                self.upload_bar(total).set_position(index as u64 + 1);
            }

            ProgressUpdate::Status { message } => self.show_status(&message),
        }
    }

    fn upload_bar(&mut self, total: usize) -> &ProgressBar {
        let bars = &self.bars;
        self.upload_bar.get_or_insert_with(|| {
            let bar = bars.add(ProgressBar::new(total as u64));
            let style = ProgressStyle::default_bar()
                .template("{msg}\n[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
                .map(|style| style.progress_chars("##-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style);
            bar
        })
    }

    /// Show a status message above the bar
    fn show_status(&self, message: &str) {
        let line = format!("{} {}", "→".green(), message);
        match &self.upload_bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }

    /// Finish the bar with a one-line summary
    pub fn finish(self) {
        if let Some(bar) = self.upload_bar {
            let mut summary = format!(
                "✓ Uploaded {} file(s) in {}",
                self.uploaded,
                format_elapsed(self.start_time.elapsed())
            );
            if self.failed > 0 {
                summary.push_str(&format!(", {} failed", self.failed));
            }
            bar.finish_with_message(summary.green().to_string());
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
