//! Directory scanning for upload candidates
//!
//! Walks a directory tree and selects the files that may be attached to an
//! assistant: accepted extension, size within the limit, and no more than the
//! configured number of files. The walk stops as soon as the file limit is
//! reached.

mod extensions;
mod order;
mod walker;

pub use extensions::{
    DEFAULT_ACCEPTED_EXTENSIONS, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_FILES, extension_of,
    normalize_extension,
};
pub use order::natural_cmp;
pub use walker::DirectoryScan;

use crate::units::format_bytes;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Input to a single scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directory the walk starts from
    pub root: PathBuf,
    /// Accepted extensions, dot included (".md"), matched case-sensitively
    pub extensions: BTreeSet<String>,
    /// Maximum number of files returned
    pub max_files: usize,
    /// Maximum size of a single file in bytes (inclusive)
    pub max_file_size: u64,
}

impl ScanConfig {
    /// Create a config for `root` using the default allow-list and limits
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_ACCEPTED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Replace the accepted extensions
    ///
    /// Extensions are taken verbatim; use [`normalize_extension`] first when
    /// they may be missing the leading dot.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the maximum number of files
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Set the maximum size of a single file
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Check whether `extension` (dot included) is on the allow-list
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }
}

/// Why a file was left out of the scan result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file's extension is not on the allow-list
    UnsupportedExtension { extension: String },
    /// The file is larger than the configured limit
    TooLarge { size: u64, limit: u64 },
    /// The entry could not be listed or measured
    Unreadable { error: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedExtension { .. } => write!(f, "it is not a supported file type"),
            Self::TooLarge { size, limit } => write!(
                f,
                "it is {}, which is larger than {}",
                format_bytes(*size),
                format_bytes(*limit)
            ),
            Self::Unreadable { error } => write!(f, "it could not be read: {error}"),
        }
    }
}

/// A file that was evaluated but not included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Everything a scan learned about the tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Eligible files in traversal order
    pub files: Vec<PathBuf>,
    /// Files left out, in traversal order
    pub skipped: Vec<SkippedFile>,
    /// True when the file limit stopped the walk early
    pub truncated: bool,
}

impl ScanOutcome {
    /// Whether no file was eligible
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Return the eligible files under `config.root`, in traversal order
pub fn scan(config: &ScanConfig) -> Vec<PathBuf> {
    DirectoryScan::new(config.clone()).collect()
}

/// Like [`scan`], but also reports skipped files and whether the limit was hit
pub fn scan_detailed(config: &ScanConfig) -> ScanOutcome {
    let mut walk = DirectoryScan::new(config.clone());
    let files: Vec<PathBuf> = walk.by_ref().collect();

    ScanOutcome {
        files,
        truncated: walk.is_truncated(),
        skipped: walk.into_skipped(),
    }
}

/// Positional form of [`scan`]
pub fn get_file_paths(
    root: &Path,
    extensions: &[&str],
    max_files: usize,
    max_file_size: u64,
) -> Vec<PathBuf> {
    let config = ScanConfig::new(root)
        .with_extensions(extensions.iter().copied())
        .with_max_files(max_files)
        .with_max_file_size(max_file_size);
    scan(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_retrieval_limits() {
        let config = ScanConfig::new("/docs");

        assert_eq!(config.max_files, 20);
        assert_eq!(config.max_file_size, 512 * 1024 * 1024);
        assert!(config.accepts_extension(".md"));
        assert!(config.accepts_extension(".tex"));
        assert!(!config.accepts_extension(".MD"));
        assert!(!config.accepts_extension("md"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ScanConfig::new("/docs")
            .with_extensions([".txt", ".md"])
            .with_max_files(10)
            .with_max_file_size(3 * 1024 * 1024);

        assert_eq!(config.extensions.len(), 2);
        assert_eq!(config.max_files, 10);
        assert!(!config.accepts_extension(".pdf"));
    }

    #[test]
    fn test_skip_reason_messages() {
        let too_large = SkipReason::TooLarge {
            size: 4 * 1024 * 1024,
            limit: 3 * 1024 * 1024,
        };
        assert_eq!(
            too_large.to_string(),
            "it is 4.00 MB, which is larger than 3.00 MB"
        );

        let unsupported = SkipReason::UnsupportedExtension {
            extension: ".exe".to_string(),
        };
        assert_eq!(unsupported.to_string(), "it is not a supported file type");
    }
}
