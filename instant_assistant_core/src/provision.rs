//! Provisioning steps: upload the scanned files, create the assistant, and
//! build the link to it
//!
//! Each step is a plain sequential call against an [`AssistantApi`]. Nothing
//! is retried; a failed upload drops that file and the run moves on.

use crate::Result;
use crate::api::{AssistantApi, AssistantId, AssistantSpec, FileId, UploadPurpose};
use crate::error::Error;
use crate::progress::{ProgressProvider, ProgressUpdate};
use std::path::PathBuf;

/// Playground page that opens a given assistant
pub const PLAYGROUND_URL: &str = "https://platform.openai.com/playground";

/// A file that could not be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUpload {
    pub path: PathBuf,
    pub message: String,
}

/// Result of the upload loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Uploaded files with their ids, in upload order
    pub uploaded: Vec<(PathBuf, FileId)>,
    /// Files that failed, in upload order
    pub failed: Vec<FailedUpload>,
}

impl UploadSummary {
    /// Ids of the uploaded files, in upload order
    pub fn file_ids(&self) -> Vec<FileId> {
        self.uploaded.iter().map(|(_, id)| id.clone()).collect()
    }
}

/// Upload each file in turn
///
/// Failures are logged and recorded; they never stop the loop.
pub async fn upload_files<A>(
    api: &A,
    paths: &[PathBuf],
    progress: &dyn ProgressProvider,
) -> UploadSummary
where
    A: AssistantApi + ?Sized,
{
    let total = paths.len();
    let mut summary = UploadSummary::default();

    for (index, path) in paths.iter().enumerate() {
        progress.report(ProgressUpdate::UploadStarted {
            index,
            total,
            path: path.clone(),
        });

        let success = match api.upload_file(path, UploadPurpose::Assistants).await {
            Ok(id) => {
                log::info!("Uploaded {}.", path.display());
                log::debug!("{} -> {id}", path.display());
                summary.uploaded.push((path.clone(), id));
                true
            }
            Err(e) => {
                let message = upload_error_message(&e);
                log::error!("Error uploading {}: {message}. Skipping...", path.display());
                summary.failed.push(FailedUpload {
                    path: path.clone(),
                    message,
                });
                false
            }
        };

        progress.report(ProgressUpdate::UploadFinished {
            index,
            total,
            path: path.clone(),
            success,
        });
    }

    summary
}

fn upload_error_message(error: &Error) -> String {
    match error {
        Error::Api(api) => api.message().to_string(),
        other => other.to_string(),
    }
}

/// Create a retrieval assistant over `file_ids`
pub async fn create_assistant<A>(
    api: &A,
    name: &str,
    instructions: &str,
    model: &str,
    file_ids: Vec<FileId>,
) -> Result<AssistantId>
where
    A: AssistantApi + ?Sized,
{
    let spec = AssistantSpec::retrieval(name, instructions, model, file_ids);
    api.create_assistant(&spec).await
}

/// Link that opens the assistant in the playground
pub fn build_assistant_url(assistant_id: &AssistantId) -> String {
    format!("{PLAYGROUND_URL}?mode=assistant&assistant={assistant_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_assistant_url() {
        let id = AssistantId::new("asst_abc123");
        assert_eq!(
            build_assistant_url(&id),
            "https://platform.openai.com/playground?mode=assistant&assistant=asst_abc123"
        );
    }

    #[test]
    fn test_summary_file_ids_keep_order() {
        let summary = UploadSummary {
            uploaded: vec![
                (PathBuf::from("b.md"), FileId::new("file-2")),
                (PathBuf::from("a.md"), FileId::new("file-1")),
            ],
            failed: Vec::new(),
        };

        assert_eq!(
            summary.file_ids(),
            vec![FileId::new("file-2"), FileId::new("file-1")]
        );
    }
}
