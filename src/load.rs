//! Directory scanning and record loading.
//!
//! Reads every publication record in a directory, validates each one, and
//! returns them in display order. This runs once per site build.
//!
//! ## Directory Structure
//!
//! ```text
//! _data/publications/          # Publications root
//! ├── publist.toml             # Loader config (optional)
//! ├── 001-fast-joins.yaml      # One record per file
//! ├── lsm-tuning.yml           # File names carry no meaning
//! ├── notes.txt                # Not a record extension, ignored
//! └── .draft.yaml              # Hidden, ignored
//! ```
//!
//! Display order comes from each record's `index` field only. File names and
//! directory order never affect it.
//!
//! ## Validation
//!
//! The loader fails fast. The first file that is unreadable, malformed, or
//! breaks a field rule aborts the scan with an error naming that file. Two
//! records sharing an `index` abort it too, naming both files.

use crate::config::{self, ConfigError, LoadConfig};
use crate::record::{self, PublicationRecord};
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error(
        "Duplicate index {index} in {} and {}",
        first.display(),
        second.display()
    )]
    DuplicateIndex {
        index: i64,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Everything the site generator needs from one scan.
#[derive(Debug, Serialize)]
pub struct Manifest {
    /// Records in ascending `index` order.
    pub publications: Vec<Entry>,
    pub config: LoadConfig,
}

/// A loaded record together with the file it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Path relative to the publications root.
    pub source: String,
    #[serde(flatten)]
    pub record: PublicationRecord,
}

/// Load all records in `dir` using the stock configuration.
pub fn load_all(dir: &Path) -> Result<Vec<PublicationRecord>, LoadError> {
    load_all_with(dir, &LoadConfig::default())
}

/// Load all records in `dir` using `config`. Sorted ascending by `index`.
pub fn load_all_with(dir: &Path, config: &LoadConfig) -> Result<Vec<PublicationRecord>, LoadError> {
    let entries = load_entries(dir, config)?;
    Ok(entries.into_iter().map(|e| e.record).collect())
}

/// Read `publist.toml` (if any) and load all records under it.
pub fn scan(root: &Path) -> Result<Manifest, LoadError> {
    let config = config::load_config(root)?;
    let publications = load_entries(root, &config)?;
    Ok(Manifest {
        publications,
        config,
    })
}

fn load_entries(root: &Path, config: &LoadConfig) -> Result<Vec<Entry>, LoadError> {
    let files = collect_record_files(root, config)?;
    debug!("found {} record files in {}", files.len(), root.display());

    let mut by_index: BTreeMap<i64, (PathBuf, Entry)> = BTreeMap::new();
    for path in files {
        let entry = load_entry(root, &path, config)?;
        let index = entry.record.index;
        if let Some((first, _)) = by_index.get(&index) {
            return Err(LoadError::DuplicateIndex {
                index,
                first: first.clone(),
                second: path,
            });
        }
        by_index.insert(index, (path, entry));
    }

    Ok(by_index.into_values().map(|(_, entry)| entry).collect())
}

fn load_entry(root: &Path, path: &Path, config: &LoadConfig) -> Result<Entry, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let record =
        PublicationRecord::parse(&text, config).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if let Some(doi) = record.doi_id() {
        if !record::looks_like_doi(doi) {
            warn!("{}: doi {doi:?} does not look like 10.NNNN/suffix", path.display());
        }
    }

    let source = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();
    debug!("loaded #{} from {source}", record.index);

    Ok(Entry { source, record })
}

/// Record files under `root`, in sorted path order. Symlinks are followed.
fn collect_record_files(root: &Path, config: &LoadConfig) -> Result<Vec<PathBuf>, LoadError> {
    if !fs::metadata(root)?.is_dir() {
        return Err(LoadError::Io(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("not a directory: {}", root.display()),
        )));
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry.map_err(|err| LoadError::Read {
            path: err.path().unwrap_or(root).to_path_buf(),
            source: io::Error::from(err),
        })?;
        if is_record_file(&entry, config) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

// The root itself may be hidden (e.g. temp dirs); only its contents are filtered.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn is_record_file(entry: &DirEntry, config: &LoadConfig) -> bool {
    if !entry.file_type().is_file() {
        return false;
    }
    if entry.depth() == 1 && entry.file_name() == config::CONFIG_FILE {
        return false;
    }
    entry
        .path()
        .extension()
        .map(|ext| config.accepts_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}
