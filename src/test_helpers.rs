//! Shared test utilities for the publist test suite.
//!
//! Provides fixture setup, record-file builders, and extractors that work
//! with loaded records and manifests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_record(tmp.path(), "a.yaml", 5);
//! write_record(tmp.path(), "b.yaml", 3);
//!
//! let records = load_all(tmp.path()).unwrap();
//! assert_eq!(indices(&records), vec![3, 5]);
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::load::Manifest;
use crate::record::PublicationRecord;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/publications/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/publications");
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

// =========================================================================
// Record builders
// =========================================================================

fn record_fields(index: i64) -> Vec<(&'static str, String)> {
    vec![
        ("index", index.to_string()),
        ("title", format!("Paper Number {index}")),
        ("authors", "\n  - Ada Lovelace\n  - Alan Turing".to_string()),
        ("conference", "VLDB".to_string()),
        ("year", "2021".to_string()),
        ("abstract", ">\n  A folded\n  abstract.".to_string()),
        ("doi", format!("10.1145/{index:07}")),
    ]
}

/// A valid record file body with the given index.
pub fn record_yaml(index: i64) -> String {
    render(record_fields(index))
}

/// A record file body with `field` left out entirely.
pub fn record_yaml_without(index: i64, field: &str) -> String {
    render(
        record_fields(index)
            .into_iter()
            .filter(|(key, _)| *key != field)
            .collect(),
    )
}

fn render(fields: Vec<(&'static str, String)>) -> String {
    fields
        .into_iter()
        .map(|(key, value)| format!("{key}: {value}\n"))
        .collect()
}

/// Write a valid record with `index` to `dir/name`.
pub fn write_record(dir: &Path, name: &str, index: i64) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, record_yaml(index)).unwrap();
    path
}

// =========================================================================
// Extractors
// =========================================================================

/// Record indices in returned order.
pub fn indices(records: &[PublicationRecord]) -> Vec<i64> {
    records.iter().map(|r| r.index).collect()
}

/// Entry source paths in manifest order.
pub fn sources(manifest: &Manifest) -> Vec<&str> {
    manifest
        .publications
        .iter()
        .map(|e| e.source.as_str())
        .collect()
}

/// Contents of every file under `root`, keyed by path.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let bytes = std::fs::read(e.path()).unwrap();
            (e.into_path(), bytes)
        })
        .collect()
}
