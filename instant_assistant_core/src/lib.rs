//! Instant Assistant Core Library
//!
//! Scans a directory for documents a retrieval assistant can use, uploads
//! them, and creates the assistant. The command line lives in
//! `instant_assistant_cli`; everything here is usable on its own.

pub mod api;
pub mod credential;
pub mod error;
pub mod progress;
pub mod provision;
pub mod scan;
pub mod units;

// Re-export main types
pub use api::{
    ApiConfig, AssistantApi, AssistantId, AssistantSpec, AssistantTool, FileId, OpenAiClient,
    UploadPurpose,
};
pub use credential::{API_KEY_ENV, SecureString, api_key_from_env};
pub use error::{Error, Result};
pub use progress::{NullProvider, ProgressProvider, ProgressUpdate, RecordingProvider};
pub use provision::{
    FailedUpload, UploadSummary, build_assistant_url, create_assistant, upload_files,
};
pub use scan::{
    DirectoryScan, ScanConfig, ScanOutcome, SkipReason, SkippedFile, get_file_paths, scan,
    scan_detailed,
};
