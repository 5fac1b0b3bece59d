//! The publication record: one YAML file describing one paper.
//!
//! ```yaml
//! index: 3
//! title: Fast Joins on Modern Hardware
//! authors:
//!   - Ada Lovelace
//!   - Alan Turing
//! conference: SIGMOD
//! year: 2021
//! abstract: >
//!   We show that joins can be fast.
//!   Very fast.
//! doi: 10.1145/1234567
//! ```
//!
//! Every key except `doi` is required; unknown keys are rejected. Records are
//! read-only here: nothing in this crate rewrites a record file.

use crate::config::LoadConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    #[error("{0}")]
    Invalid(String),
}

/// One publication as authored in its record file.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublicationRecord {
    /// Display position; unique within a record set.
    pub index: i64,
    pub title: String,
    pub authors: Vec<String>,
    /// Venue name or abbreviation, free text.
    pub conference: String,
    pub year: i32,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

const DOI_URL_PREFIXES: &[&str] = &[
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
];

impl PublicationRecord {
    /// Parse and validate a record against the default configuration.
    pub fn from_yaml(text: &str) -> Result<Self, RecordError> {
        Self::parse(text, &LoadConfig::default())
    }

    /// Parse and validate a record against `config`.
    pub fn parse(text: &str, config: &LoadConfig) -> Result<Self, RecordError> {
        let record: PublicationRecord = serde_yaml_ng::from_str(text)?;
        record.validate(config)?;
        Ok(record)
    }

    /// Canonical YAML form, keys in declaration order.
    pub fn to_yaml(&self) -> Result<String, RecordError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check the field constraints serde cannot express.
    pub fn validate(&self, config: &LoadConfig) -> Result<(), RecordError> {
        if self.title.trim().is_empty() {
            return Err(RecordError::Invalid("title must not be empty".into()));
        }
        if self.authors.is_empty() {
            return Err(RecordError::Invalid(
                "authors must list at least one author".into(),
            ));
        }
        if let Some(pos) = self.authors.iter().position(|a| a.trim().is_empty()) {
            return Err(RecordError::Invalid(format!(
                "authors[{pos}] must not be empty"
            )));
        }
        if !config.years.contains(self.year) {
            return Err(RecordError::Invalid(format!(
                "year {} is outside the accepted range {}-{}",
                self.year, config.years.min, config.years.max
            )));
        }
        match self.doi_id() {
            Some(id) if id.is_empty() => {
                return Err(RecordError::Invalid(
                    "doi must not be empty when present".into(),
                ));
            }
            None if config.require_doi => {
                return Err(RecordError::Invalid("missing field `doi`".into()));
            }
            _ => {}
        }
        Ok(())
    }

    /// The bare DOI with any resolver URL or `doi:` prefix removed.
    pub fn doi_id(&self) -> Option<&str> {
        let doi = self.doi.as_deref()?.trim();
        let bare = DOI_URL_PREFIXES
            .iter()
            .find_map(|prefix| strip_prefix_ignore_case(doi, prefix))
            .unwrap_or(doi);
        Some(bare.trim())
    }

    /// Resolver link for the DOI, or `None` when the record has no DOI.
    pub fn doi_url(&self) -> Option<String> {
        self.doi_id().map(|id| format!("https://doi.org/{id}"))
    }

    /// Authors joined for display: `A`, `A and B`, `A, B and C`.
    pub fn author_line(&self) -> String {
        match self.authors.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
        }
    }
}

/// Whether `doi` has the `10.<registrant>/<suffix>` shape.
///
/// Only used to warn; any non-blank DOI is accepted.
pub fn looks_like_doi(doi: &str) -> bool {
    let Some(rest) = doi.strip_prefix("10.") else {
        return false;
    };
    let Some((registrant, suffix)) = rest.split_once('/') else {
        return false;
    };
    registrant.len() >= 4
        && registrant.chars().all(|c| c.is_ascii_digit() || c == '.')
        && !suffix.trim().is_empty()
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
