//! Directory scan tests against real temporary trees

use instant_assistant_core::scan::{ScanConfig, SkipReason, get_file_paths, scan, scan_detailed};
use instant_assistant_test_utils::{MIB, TestTreeBuilder, reference_fixture};
use std::path::PathBuf;

fn fixture_config(root: &std::path::Path) -> ScanConfig {
    ScanConfig::new(root)
        .with_extensions([".txt", ".md"])
        .with_max_files(10)
        .with_max_file_size(3 * MIB)
}

#[test]
fn test_reference_fixture_sequence() {
    let tree = reference_fixture().unwrap();

    let files = scan(&fixture_config(tree.root()));

    let expected: Vec<PathBuf> = [
        "file1.txt",
        "file2.txt",
        "subdirectory/file3.txt",
        "subdirectory/file6.md",
        "subdirectory/file7.md",
        "subdirectory/file8.md",
        "subdirectory/file9.md",
        "subdirectory/file10.md",
        "subdirectory/file11.md",
        "subdirectory/file12.md",
    ]
    .iter()
    .map(|relative| tree.path(relative))
    .collect();

    assert_eq!(files, expected);
}

#[test]
fn test_reference_fixture_positional_form() {
    let tree = reference_fixture().unwrap();

    let files = get_file_paths(tree.root(), &[".txt", ".md"], 10, 3 * MIB);

    assert_eq!(files.len(), 10);
    assert_eq!(files[0], tree.path("file1.txt"));
    assert_eq!(files[9], tree.path("subdirectory/file12.md"));
}

#[test]
fn test_reference_fixture_skip_reasons() {
    let tree = reference_fixture().unwrap();

    let outcome = scan_detailed(&fixture_config(tree.root()));

    assert!(outcome.truncated);
    let skipped: Vec<(PathBuf, SkipReason)> = outcome
        .skipped
        .into_iter()
        .map(|skip| (skip.path, skip.reason))
        .collect();

    assert_eq!(
        skipped,
        vec![
            (
                tree.path("invalid.invalid_file_type"),
                SkipReason::UnsupportedExtension {
                    extension: ".invalid_file_type".to_string()
                }
            ),
            (
                tree.path("subdirectory/file4.txt"),
                SkipReason::TooLarge {
                    size: 4 * MIB,
                    limit: 3 * MIB
                }
            ),
            (
                tree.path("subdirectory/file5.txt"),
                SkipReason::TooLarge {
                    size: 5 * MIB,
                    limit: 3 * MIB
                }
            ),
        ]
    );
}

#[test]
fn test_scan_is_repeatable() {
    let tree = reference_fixture().unwrap();
    let config = fixture_config(tree.root());

    assert_eq!(scan(&config), scan(&config));
}

#[test]
fn test_default_config_accepts_documents() {
    let tree = TestTreeBuilder::new()
        .file("report.pdf", 10)
        .file("notes.md", 10)
        .file("script.py", 10)
        .file("photo.jpg", 10)
        .file("archive.zip", 10)
        .build()
        .unwrap();

    let outcome = scan_detailed(&ScanConfig::new(tree.root()));

    assert_eq!(
        outcome.files,
        vec![
            tree.path("notes.md"),
            tree.path("report.pdf"),
            tree.path("script.py"),
        ]
    );
    assert_eq!(outcome.skipped.len(), 2);
    assert!(!outcome.truncated);
}

#[test]
fn test_extension_match_is_case_sensitive() {
    let tree = TestTreeBuilder::new()
        .file("README.MD", 10)
        .file("readme.md", 10)
        .build()
        .unwrap();

    let files = scan(&ScanConfig::new(tree.root()).with_extensions([".md"]));

    assert_eq!(files, vec![tree.path("readme.md")]);
}

#[test]
fn test_file_at_size_limit_is_included() {
    let tree = TestTreeBuilder::new()
        .file("exact.txt", 1000)
        .file("over.txt", 1001)
        .build()
        .unwrap();

    let files = scan(
        &ScanConfig::new(tree.root())
            .with_extensions([".txt"])
            .with_max_file_size(1000),
    );

    assert_eq!(files, vec![tree.path("exact.txt")]);
}

#[test]
fn test_empty_and_missing_roots_yield_nothing() {
    let tree = TestTreeBuilder::new().dir("empty").build().unwrap();

    assert!(scan(&ScanConfig::new(tree.path("empty"))).is_empty());

    let outcome = scan_detailed(&ScanConfig::new(tree.path("missing")));
    assert!(outcome.is_empty());
    assert!(matches!(
        outcome.skipped[0].reason,
        SkipReason::Unreadable { .. }
    ));
}

#[test]
fn test_limit_stops_before_later_directories() {
    let tree = TestTreeBuilder::new()
        .file("a.md", 1)
        .file("b.md", 1)
        .file("later/huge.md", 10 * MIB)
        .file("later/c.md", 1)
        .build()
        .unwrap();

    let outcome = scan_detailed(
        &ScanConfig::new(tree.root())
            .with_extensions([".md"])
            .with_max_files(2)
            .with_max_file_size(MIB),
    );

    assert_eq!(outcome.files, vec![tree.path("a.md"), tree.path("b.md")]);
    assert!(outcome.truncated);
    // The oversized file is past the cutoff, so it is never evaluated
    assert!(outcome.skipped.is_empty());
}
