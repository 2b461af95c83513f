//! Property tests for the directory scan
//!
//! Random trees are built on disk; each property is checked against a
//! scan of the same tree with and without limits.

use instant_assistant_core::scan::{ScanConfig, extension_of, scan};
use instant_assistant_test_utils::{TestTree, TestTreeBuilder};
use proptest::prelude::*;
use std::fs;

const EXTENSIONS: &[&str] = &[".md", ".txt", ".pdf", ".bin", ""];

/// (directory index, extension index, size) for each generated file
fn tree_strategy() -> impl Strategy<Value = Vec<(usize, usize, u64)>> {
    prop::collection::vec((0usize..3, 0usize..EXTENSIONS.len(), 0u64..4096), 0..24)
}

fn build_tree(layout: &[(usize, usize, u64)]) -> TestTree {
    let mut builder = TestTreeBuilder::new();
    for (n, (dir, ext, size)) in layout.iter().enumerate() {
        let relative = match dir {
            0 => format!("doc{n}{}", EXTENSIONS[*ext]),
            1 => format!("a/doc{n}{}", EXTENSIONS[*ext]),
            _ => format!("a/b/doc{n}{}", EXTENSIONS[*ext]),
        };
        builder = builder.file(relative, *size);
    }
    builder.build().unwrap()
}

fn config(tree: &TestTree, max_files: usize, max_file_size: u64) -> ScanConfig {
    ScanConfig::new(tree.root())
        .with_extensions([".md", ".txt", ".pdf"])
        .with_max_files(max_files)
        .with_max_file_size(max_file_size)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_result_respects_every_filter(
        layout in tree_strategy(),
        max_files in 0usize..30,
        max_file_size in 0u64..4096,
    ) {
        let tree = build_tree(&layout);
        let config = config(&tree, max_files, max_file_size);

        let files = scan(&config);

        prop_assert!(files.len() <= max_files);
        for file in &files {
            prop_assert!(file.starts_with(tree.root()));
            prop_assert!(config.accepts_extension(&extension_of(file)));
            prop_assert!(fs::metadata(file).unwrap().len() <= max_file_size);
        }
    }

    #[test]
    fn test_limited_scan_is_prefix_of_unlimited(
        layout in tree_strategy(),
        max_files in 0usize..30,
    ) {
        let tree = build_tree(&layout);

        let unlimited = scan(&config(&tree, usize::MAX, 4096));
        let limited = scan(&config(&tree, max_files, 4096));

        let expected_len = unlimited.len().min(max_files);
        prop_assert_eq!(&limited[..], &unlimited[..expected_len]);
    }

    #[test]
    fn test_scan_is_idempotent(layout in tree_strategy(), max_files in 0usize..30) {
        let tree = build_tree(&layout);
        let config = config(&tree, max_files, 2048);

        prop_assert_eq!(scan(&config), scan(&config));
    }

    #[test]
    fn test_zero_limit_yields_nothing(layout in tree_strategy()) {
        let tree = build_tree(&layout);

        prop_assert!(scan(&config(&tree, 0, 4096)).is_empty());
    }
}

#[test]
fn test_extensionless_and_dotfiles_are_never_included() {
    let tree = TestTreeBuilder::new()
        .file("Makefile", 1)
        .file(".md", 1)
        .file("notes.md", 1)
        .build()
        .unwrap();

    let files = scan(&ScanConfig::new(tree.root()).with_extensions([".md"]));

    assert_eq!(files, vec![tree.path("notes.md")]);
}
