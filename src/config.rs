//! Loader configuration.
//!
//! Handles loading and validating the optional `publist.toml` that lives next
//! to the record files. Without it, the stock defaults apply.
//!
//! ## Config File Location
//!
//! ```text
//! _data/publications/
//! ├── publist.toml            # Optional, never treated as a record
//! ├── 001-fast-joins.yaml
//! └── 002-lsm-tuning.yml
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! extensions = ["yaml", "yml"]  # Record file extensions (case-insensitive)
//! recursive = false             # Also read records from subdirectories
//! require_doi = false           # Fail records that have no `doi`
//!
//! [years]
//! min = 1900                    # Plausible publication years (inclusive)
//! max = 2100
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file inside the publications directory.
pub const CONFIG_FILE: &str = "publist.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Loader configuration read from `publist.toml`.
///
/// All fields have defaults; a config file need only name the values it
/// overrides. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// File extensions treated as record files, compared case-insensitively.
    pub extensions: Vec<String>,
    /// Walk subdirectories as well as the top level.
    pub recursive: bool,
    /// Treat a missing `doi` as a parse error.
    pub require_doi: bool,
    /// Accepted publication years.
    pub years: YearRange,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["yaml".to_string(), "yml".to_string()],
            recursive: false,
            require_doi: false,
            years: YearRange::default(),
        }
    }
}

impl LoadConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if self.extensions.iter().any(|e| e.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "extensions must not contain blank entries".into(),
            ));
        }
        self.years.validate()
    }

    /// Whether `ext` is one of the configured record extensions.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

/// Inclusive range of plausible publication years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 1900,
            max: 2100,
        }
    }
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let four_digits = 1000..=9999;
        if !four_digits.contains(&self.min) || !four_digits.contains(&self.max) {
            return Err(ConfigError::Validation(
                "years.min and years.max must be 4-digit years".into(),
            ));
        }
        if self.min > self.max {
            return Err(ConfigError::Validation(format!(
                "years.min ({}) must not exceed years.max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Load config from `publist.toml` in the given directory.
///
/// Returns the stock defaults when no file exists. Rejects unknown keys and
/// validates the result.
pub fn load_config(root: &Path) -> Result<LoadConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.is_file() {
        return Ok(LoadConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: LoadConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `publist.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# publist configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to the publication records. It is never read
# as a record itself. Unknown keys will cause an error.

# File extensions treated as publication records (case-insensitive).
extensions = ["yaml", "yml"]

# Also read records from subdirectories. Hidden directories are skipped.
recursive = false

# When true, a record without a `doi` fails the build.
# When false, records without a DOI load and render no identifier.
require_doi = false

# Plausible publication years, inclusive. Both bounds must be 4-digit years.
[years]
min = 1900
max = 2100
"##
}
