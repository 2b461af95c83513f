//! Mock implementation of the assistant API for testing

use async_trait::async_trait;
use instant_assistant_core::api::{
    AssistantApi, AssistantId, AssistantSpec, FileId, UploadPurpose,
};
use instant_assistant_core::error::ApiError;
use instant_assistant_core::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock implementation of [`AssistantApi`] for testing
///
/// Uploads succeed by default and hand out sequential ids (`file-1`,
/// `file-2`, ...). Failures are scripted per file name. Every call is
/// recorded so tests can check what reached the "remote" side. Clones share
/// state, so a test can keep a handle after moving the mock into an
/// orchestrator.
///
/// # Examples
///
/// ```rust,no_run
/// use instant_assistant_test_utils::MockAssistantApi;
/// use instant_assistant_core::api::{AssistantApi, UploadPurpose};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mock = MockAssistantApi::new();
/// mock.expect_upload_failure("broken.pdf", 400, "Invalid file format");
///
/// let id = mock.upload_file(Path::new("notes.md"), UploadPurpose::Assistants).await?;
/// assert_eq!(id.as_str(), "file-1");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct MockAssistantApi {
    behavior: Arc<Mutex<MockBehavior>>,
}

/// Configuration and call log of the mock
#[derive(Debug, Default)]
struct MockBehavior {
    upload_failures: HashMap<String, MockError>,
    assistant_failure: Option<MockError>,
    assistant_id: Option<String>,
    delay: Duration,
    uploads: Vec<(PathBuf, UploadPurpose)>,
    assistants: Vec<AssistantSpec>,
    next_file_id: usize,
}

#[derive(Debug, Clone)]
enum MockError {
    Status { status: u16, message: String },
    Transport(String),
}

impl From<MockError> for Error {
    fn from(mock_error: MockError) -> Self {
        match mock_error {
            MockError::Status { status, message } => Error::Api(ApiError::status(status, &message)),
            MockError::Transport(message) => Error::Api(ApiError::transport(message)),
        }
    }
}

impl MockAssistantApi {
    /// Create a new mock with default behavior
    pub fn new() -> Self {
        Self::default()
    }

    /// Make uploads of files named `file_name` fail with an API status
    pub fn expect_upload_failure(&self, file_name: &str, status: u16, message: &str) {
        let mut behavior = self.behavior.lock().unwrap();
        behavior.upload_failures.insert(
            file_name.to_string(),
            MockError::Status {
                status,
                message: message.to_string(),
            },
        );
    }

    /// Make uploads of files named `file_name` fail as if the network dropped
    pub fn expect_upload_transport_failure(&self, file_name: &str, message: &str) {
        let mut behavior = self.behavior.lock().unwrap();
        behavior.upload_failures.insert(
            file_name.to_string(),
            MockError::Transport(message.to_string()),
        );
    }

    /// Make assistant creation fail with an API status
    pub fn expect_assistant_failure(&self, status: u16, message: &str) {
        let mut behavior = self.behavior.lock().unwrap();
        behavior.assistant_failure = Some(MockError::Status {
            status,
            message: message.to_string(),
        });
    }

    /// Use a fixed id for created assistants (default `asst_mock`)
    pub fn with_assistant_id(self, id: &str) -> Self {
        self.behavior.lock().unwrap().assistant_id = Some(id.to_string());
        self
    }

    /// Wait this long inside every call
    pub fn with_delay(self, delay: Duration) -> Self {
        self.behavior.lock().unwrap().delay = delay;
        self
    }

    /// Paths passed to `upload_file`, in call order (failed ones included)
    pub fn upload_calls(&self) -> Vec<PathBuf> {
        let behavior = self.behavior.lock().unwrap();
        behavior
            .uploads
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Purposes passed to `upload_file`, in call order
    pub fn upload_purposes(&self) -> Vec<UploadPurpose> {
        let behavior = self.behavior.lock().unwrap();
        behavior
            .uploads
            .iter()
            .map(|(_, purpose)| *purpose)
            .collect()
    }

    /// Specs passed to `create_assistant`, in call order
    pub fn created_assistants(&self) -> Vec<AssistantSpec> {
        self.behavior.lock().unwrap().assistants.clone()
    }

    /// Forget recorded calls and scripted failures
    pub fn reset(&self) {
        *self.behavior.lock().unwrap() = MockBehavior::default();
    }

    fn delay(&self) -> Duration {
        self.behavior.lock().unwrap().delay
    }
}

#[async_trait]
impl AssistantApi for MockAssistantApi {
    async fn upload_file(&self, path: &Path, purpose: UploadPurpose) -> Result<FileId> {
        let delay = self.delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut behavior = self.behavior.lock().unwrap();
        behavior.uploads.push((path.to_path_buf(), purpose));

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Some(error) = behavior.upload_failures.get(&file_name) {
            return Err(error.clone().into());
        }

        behavior.next_file_id += 1;
        Ok(FileId::new(format!("file-{}", behavior.next_file_id)))
    }

    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<AssistantId> {
        let delay = self.delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut behavior = self.behavior.lock().unwrap();
        behavior.assistants.push(spec.clone());

        if let Some(error) = behavior.assistant_failure.clone() {
            return Err(error.into());
        }

        let id = behavior
            .assistant_id
            .clone()
            .unwrap_or_else(|| "asst_mock".to_string());
        Ok(AssistantId::new(id))
    }
}
