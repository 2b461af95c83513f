//! Assistant API abstraction
//!
//! The remote service is reached through the [`AssistantApi`] trait: one call
//! to upload a file, one call to create an assistant over uploaded files.
//! [`OpenAiClient`] is the HTTP implementation; tests substitute a mock.

mod openai;

pub use openai::OpenAiClient;

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model backing new assistants
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-1106";

/// Connection settings for the assistant API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            // Large documents take a while to upload
            timeout_seconds: 300,
        }
    }
}

/// Identifier of an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

/// Identifier of a created assistant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssistantId(String);

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_id!(FileId);
impl_id!(AssistantId);

/// Purpose tag attached to an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPurpose {
    /// File is meant to be attached to assistants
    Assistants,
}

impl UploadPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assistants => "assistants",
        }
    }
}

/// Tool enabled on an assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantTool {
    /// Retrieval over the attached files
    Retrieval,
}

/// Request body for assistant creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantSpec {
    pub name: String,
    pub instructions: String,
    pub model: String,
    pub tools: Vec<AssistantTool>,
    pub file_ids: Vec<FileId>,
}

impl AssistantSpec {
    /// A retrieval assistant over `file_ids`
    pub fn retrieval(
        name: impl Into<String>,
        instructions: impl Into<String>,
        model: impl Into<String>,
        file_ids: Vec<FileId>,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model: model.into(),
            tools: vec![AssistantTool::Retrieval],
            file_ids,
        }
    }
}

/// The two remote operations a provisioning run needs
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Upload one file and return its identifier
    async fn upload_file(&self, path: &Path, purpose: UploadPurpose) -> Result<FileId>;

    /// Create an assistant and return its identifier
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<AssistantId>;
}

#[async_trait]
impl<T: AssistantApi + ?Sized> AssistantApi for std::sync::Arc<T> {
    async fn upload_file(&self, path: &Path, purpose: UploadPurpose) -> Result<FileId> {
        (**self).upload_file(path, purpose).await
    }

    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<AssistantId> {
        (**self).create_assistant(spec).await
    }
}
