//! Directory walker with an early stop at the file limit
//!
//! Uses walkdir for traversal; entries of each directory are sorted (files
//! first, natural name order) so a given tree always scans the same way.

use std::fs;
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

use super::{ScanConfig, SkipReason, SkippedFile, extension_of, order::compare_entries};

/// Lazy scan over a directory tree
///
/// Yields eligible file paths in traversal order. Once `max_files` paths have
/// been yielded, the next file encountered ends the walk for good: the
/// underlying walker is dropped and the iterator only returns `None`.
pub struct DirectoryScan {
    /// Walker for directory traversal, `None` once the scan has ended
    walker: Option<walkdir::IntoIter>,
    config: ScanConfig,
    included: usize,
    skipped: Vec<SkippedFile>,
    truncated: bool,
}

impl DirectoryScan {
    /// Start a scan of `config.root`
    pub fn new(config: ScanConfig) -> Self {
        let walker = WalkDir::new(&config.root)
            .follow_links(false)
            .sort_by(compare_entries)
            .into_iter();

        log::debug!(
            "Scanning {} for {} extension(s), at most {} file(s)",
            config.root.display(),
            config.extensions.len(),
            config.max_files
        );

        Self {
            walker: Some(walker),
            config,
            included: 0,
            skipped: Vec::new(),
            truncated: false,
        }
    }

    /// Whether the file limit ended the walk
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Files skipped so far
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Consume the scan, keeping the skipped files
    pub fn into_skipped(self) -> Vec<SkippedFile> {
        self.skipped
    }

    /// Apply the extension and size filters to one file
    fn evaluate(&mut self, entry: &DirEntry) -> Option<PathBuf> {
        let path = entry.path();

        let extension = extension_of(path);
        if !self.config.accepts_extension(&extension) {
            return self.skip(
                path.to_path_buf(),
                SkipReason::UnsupportedExtension { extension },
            );
        }

        // fs::metadata follows a symlinked file to its target, like a size query
        let size = match fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                return self.skip(
                    path.to_path_buf(),
                    SkipReason::Unreadable {
                        error: e.to_string(),
                    },
                );
            }
        };

        if size > self.config.max_file_size {
            return self.skip(
                path.to_path_buf(),
                SkipReason::TooLarge {
                    size,
                    limit: self.config.max_file_size,
                },
            );
        }

        Some(path.to_path_buf())
    }

    fn skip(&mut self, path: PathBuf, reason: SkipReason) -> Option<PathBuf> {
        match reason {
            SkipReason::Unreadable { .. } => {
                log::error!("Skipping {} because {reason}.", path.display())
            }
            _ => log::warn!("Skipping {} because {reason}.", path.display()),
        }
        self.skipped.push(SkippedFile { path, reason });
        None
    }

    fn stop(&mut self, next: &DirEntry) {
        log::warn!(
            "Skipping {} because the maximum number of files has been reached.",
            next.path().display()
        );
        self.truncated = true;
        self.walker = None;
    }
}

/// Whether an entry is listed as a file
///
/// Directories are descended into, never evaluated. A symlink counts as a
/// file unless it points at a directory; links are never followed during the
/// walk itself.
fn is_candidate(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return false;
    }
    if file_type.is_symlink() {
        return !entry.path().is_dir();
    }
    true
}

impl Iterator for DirectoryScan {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.walker.as_mut()?.next();

            let entry = match next {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    // Unlistable directory or vanished entry: record it and keep walking
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    self.skip(
                        path,
                        SkipReason::Unreadable {
                            error: e.to_string(),
                        },
                    );
                    continue;
                }
                None => {
                    self.walker = None;
                    return None;
                }
            };

            if !is_candidate(&entry) {
                log::trace!("Descending into {}", entry.path().display());
                continue;
            }

            if self.included >= self.config.max_files {
                self.stop(&entry);
                return None;
            }

            if let Some(path) = self.evaluate(&entry) {
                self.included += 1;
                log::debug!("Selected {}", path.display());
                return Some(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(path: &std::path::Path, size: usize) {
        fs::write(path, vec![b'x'; size]).unwrap();
    }

    fn create_test_directory() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        write_file(&base.join("a.md"), 10);
        write_file(&base.join("b.txt"), 10);
        write_file(&base.join("c.exe"), 10);
        write_file(&base.join("d.pdf"), 500);

        let subdir = base.join("nested");
        fs::create_dir(&subdir).unwrap();
        write_file(&subdir.join("e.md"), 10);
        write_file(&subdir.join("f.py"), 10);

        dir
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_files_before_subdirectories() {
        let dir = create_test_directory();
        let config = ScanConfig::new(dir.path()).with_extensions([".md", ".txt", ".py"]);

        let files: Vec<_> = DirectoryScan::new(config).collect();

        assert_eq!(names(&files), vec!["a.md", "b.txt", "e.md", "f.py"]);
    }

    #[test]
    fn test_paths_are_rooted_at_scan_root() {
        let dir = create_test_directory();
        let config = ScanConfig::new(dir.path()).with_extensions([".md"]);

        let files: Vec<_> = DirectoryScan::new(config).collect();

        assert_eq!(files[0], dir.path().join("a.md"));
        assert_eq!(files[1], dir.path().join("nested").join("e.md"));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let dir = create_test_directory();
        let config = ScanConfig::new(dir.path())
            .with_extensions([".pdf"])
            .with_max_file_size(500);

        let files: Vec<_> = DirectoryScan::new(config).collect();
        assert_eq!(names(&files), vec!["d.pdf"]);

        let config = ScanConfig::new(dir.path())
            .with_extensions([".pdf"])
            .with_max_file_size(499);
        let mut walk = DirectoryScan::new(config);
        assert!(walk.next().is_none());
        let oversized = walk
            .skipped()
            .iter()
            .find(|s| s.path.ends_with("d.pdf"))
            .unwrap();
        assert_eq!(
            oversized.reason,
            SkipReason::TooLarge {
                size: 500,
                limit: 499
            }
        );
    }

    #[test]
    fn test_limit_stops_walk_before_next_file() {
        let dir = create_test_directory();
        let config = ScanConfig::new(dir.path())
            .with_extensions([".md", ".txt"])
            .with_max_files(2);

        let mut walk = DirectoryScan::new(config);
        let files: Vec<_> = walk.by_ref().collect();

        assert_eq!(names(&files), vec!["a.md", "b.txt"]);
        assert!(walk.is_truncated());
        // c.exe would have been skipped anyway, but it is never evaluated
        assert!(walk.skipped().is_empty());
    }

    #[test]
    fn test_exhausted_scan_stays_exhausted() {
        let dir = create_test_directory();
        let config = ScanConfig::new(dir.path())
            .with_extensions([".md"])
            .with_max_files(1);

        let mut walk = DirectoryScan::new(config);
        assert!(walk.next().is_some());
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
        assert!(walk.is_truncated());
    }

    #[test]
    fn test_zero_limit_yields_nothing() {
        let dir = create_test_directory();
        let config = ScanConfig::new(dir.path()).with_max_files(0);

        let mut walk = DirectoryScan::new(config);
        assert!(walk.next().is_none());
        assert!(walk.is_truncated());
        assert!(walk.skipped().is_empty());
    }

    #[test]
    fn test_missing_root_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let config = ScanConfig::new(dir.path().join("missing"));

        let mut walk = DirectoryScan::new(config);
        assert!(walk.next().is_none());
        assert!(!walk.is_truncated());
        assert!(matches!(
            walk.skipped()[0].reason,
            SkipReason::Unreadable { .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_are_not_followed() {
        let dir = create_test_directory();
        std::os::unix::fs::symlink(dir.path().join("nested"), dir.path().join("link")).unwrap();
        let config = ScanConfig::new(dir.path()).with_extensions([".md"]);

        let files: Vec<_> = DirectoryScan::new(config).collect();

        assert_eq!(names(&files), vec!["a.md", "e.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_listed_like_a_file() {
        let dir = create_test_directory();
        std::os::unix::fs::symlink(dir.path().join("a.md"), dir.path().join("alias.md")).unwrap();
        let config = ScanConfig::new(dir.path()).with_extensions([".md"]);

        let files: Vec<_> = DirectoryScan::new(config).collect();

        assert_eq!(names(&files), vec!["a.md", "alias.md", "e.md"]);
    }
}
