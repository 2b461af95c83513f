//! Temporary directory trees for scan and CLI tests

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One mebibyte, the unit fixture sizes are written in
pub const MIB: u64 = 1024 * 1024;

/// Builder for a directory tree inside a fresh temporary directory
///
/// Files are created with `set_len`, so large sizes cost no real disk space
/// on filesystems with sparse file support.
///
/// ```rust,no_run
/// use instant_assistant_test_utils::{MIB, TestTreeBuilder};
///
/// let tree = TestTreeBuilder::new()
///     .file("notes.md", 10)
///     .file("docs/manual.pdf", 2 * MIB)
///     .dir("empty")
///     .build()
///     .unwrap();
///
/// assert!(tree.path("docs/manual.pdf").exists());
/// ```
#[derive(Debug, Default)]
pub struct TestTreeBuilder {
    files: Vec<(PathBuf, u64)>,
    dirs: Vec<PathBuf>,
}

impl TestTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file of `size` bytes; parent directories are created
    pub fn file(mut self, relative: impl AsRef<Path>, size: u64) -> Self {
        self.files.push((relative.as_ref().to_path_buf(), size));
        self
    }

    /// Add an (possibly empty) directory
    pub fn dir(mut self, relative: impl AsRef<Path>) -> Self {
        self.dirs.push(relative.as_ref().to_path_buf());
        self
    }

    /// Materialize the tree
    pub fn build(self) -> io::Result<TestTree> {
        let temp = TempDir::new()?;

        for dir in &self.dirs {
            fs::create_dir_all(temp.path().join(dir))?;
        }

        for (relative, size) in &self.files {
            let path = temp.path().join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            File::create(&path)?.set_len(*size)?;
        }

        Ok(TestTree { temp })
    }
}

/// A materialized tree; removed from disk when dropped
#[derive(Debug)]
pub struct TestTree {
    temp: TempDir,
}

impl TestTree {
    /// Root of the tree
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Absolute path of an entry inside the tree
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.temp.path().join(relative)
    }
}

/// The reference layout used across scan tests
///
/// Root holds `file1.txt` (1 MiB), `file2.txt` (2 MiB) and
/// `invalid.invalid_file_type` (1 MiB). `subdirectory/` holds `file3.txt`
/// to `file5.txt` (3, 4 and 5 MiB) and `file6.md` to `file20.md` (1 MiB each).
pub fn reference_fixture() -> io::Result<TestTree> {
    let mut builder = TestTreeBuilder::new()
        .file("file1.txt", MIB)
        .file("file2.txt", 2 * MIB)
        .file("invalid.invalid_file_type", MIB)
        .file("subdirectory/file3.txt", 3 * MIB)
        .file("subdirectory/file4.txt", 4 * MIB)
        .file("subdirectory/file5.txt", 5 * MIB);

    for n in 6..=20 {
        builder = builder.file(format!("subdirectory/file{n}.md"), MIB);
    }

    builder.build()
}
