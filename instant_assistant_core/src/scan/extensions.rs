//! Accepted file extensions and scan limits
//!
//! The retrieval tool only indexes a fixed set of text and document formats,
//! and caps both the number of files per assistant and the size of each file.

use std::path::Path;

/// Extensions the retrieval tool accepts, dot included
pub const DEFAULT_ACCEPTED_EXTENSIONS: &[&str] = &[
    ".c", ".cpp", ".docx", ".html", ".java", ".json", ".md", ".pdf", ".php", ".pptx", ".py", ".rb",
    ".tex", ".txt",
];

/// Maximum number of files attached to one assistant
pub const DEFAULT_MAX_FILES: usize = 20;

/// Maximum size of a single uploaded file (512 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Extension of `path` including the leading dot, or an empty string
///
/// Only the last suffix counts (`archive.tar.gz` -> `.gz`), and a leading dot
/// alone does not make an extension (`.bashrc` -> ``).
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Ensure an extension carries its leading dot (`md` -> `.md`)
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim();
    if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{trimmed}")
    }
}
