//! # publist
//!
//! Loader and validator for the publication list of a static blog.
//!
//! Each publication lives in its own YAML file. An external static-site
//! generator renders the list; this crate's only job is to read the
//! directory, reject anything malformed, and hand back the records in
//! display order.
//!
//! ```text
//! _data/publications/  →  load::load_all  →  Vec<PublicationRecord>   (sorted by index)
//!                      →  load::scan      →  Manifest → JSON export   (generator input)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`record`] | `PublicationRecord`: YAML shape, field rules, DOI and author helpers |
//! | [`load`] | Directory scan, fail-fast parsing, index ordering and uniqueness |
//! | [`config`] | Optional `publist.toml`: extensions, recursion, DOI policy, year range |
//! | [`output`] | CLI listing formatting |
//!
//! # Failure Model
//!
//! A build must never publish with a silently dropped or corrupted entry, so
//! there is no partial result: the first malformed file or duplicated
//! `index` ends the run with an error that names the file(s) involved.
//!
//! # DOI Policy
//!
//! `doi` is optional. Preprints often have none, and a record without one
//! simply renders no identifier. Set `require_doi = true` in `publist.toml`
//! to make it mandatory.

pub mod config;
pub mod load;
pub mod output;
pub mod record;

pub use load::{LoadError, load_all, load_all_with, scan};
pub use record::PublicationRecord;

#[cfg(test)]
pub(crate) mod test_helpers;
