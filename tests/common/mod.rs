#![allow(dead_code)]

use std::path::{Path, PathBuf};

use covview::annotate::TagFamily;
use tempfile::TempDir;

/// Path to a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Write `contents` to `name` inside a fresh temporary directory.
/// The caller must hold onto `TempDir` to keep the file alive.
pub fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

/// Number of `<span ...>` and `</span>` tags in `s`.
pub fn span_counts(s: &str) -> (usize, usize) {
    TagFamily::default().count_tags(s)
}
