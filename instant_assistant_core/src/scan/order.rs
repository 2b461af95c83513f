//! Deterministic ordering of directory entries
//!
//! Directory listings come back in whatever order the filesystem keeps them.
//! Entries are sorted so that runs of digits compare by value, which keeps
//! `chapter2.md` ahead of `chapter10.md`.

use std::cmp::Ordering;
use walkdir::DirEntry;

/// Compare two names, treating digit runs as numbers
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = compare_chunks(x, y);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Walk order within one directory: files first, then directories, each in
/// natural name order
pub(crate) fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();

    a_dir.cmp(&b_dir).then_with(|| {
        natural_cmp(
            &a.file_name().to_string_lossy(),
            &b.file_name().to_string_lossy(),
        )
    })
}

fn compare_chunks(a: &str, b: &str) -> Ordering {
    let a_digits = a.starts_with(|c: char| c.is_ascii_digit());
    let b_digits = b.starts_with(|c: char| c.is_ascii_digit());

    match (a_digits, b_digits) {
        (true, true) => {
            let a_value = a.trim_start_matches('0');
            let b_value = b.trim_start_matches('0');
            a_value
                .len()
                .cmp(&b_value.len())
                .then_with(|| a_value.cmp(b_value))
                // "7" before "007"
                .then_with(|| a.len().cmp(&b.len()))
        }
        _ => a.cmp(b),
    }
}

/// Splits a name into alternating digit and non-digit runs
struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());

        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}
