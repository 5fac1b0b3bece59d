//! CLI output formatting.
//!
//! Output is information-first: each publication leads with its display
//! index and title, with the source file and details shown as indented
//! context lines underneath.
//!
//! ```text
//! Publications
//! 001 Vectorized Hash Joins on Commodity Hardware
//!     Source: vectorized-joins.yml
//!     Authors: Jonah Whitfield and Mira Castellanos
//!     Venue: SIGMOD 2021
//!     DOI: https://doi.org/10.1145/3448016.3457234
//!     Hash joins dominate analytical query time. We revisit the b...
//!
//! 3 publications
//! ```
//!
//! Each `format_*` function returns `Vec<String>` and does no I/O; the
//! `print_*` wrappers write to stdout.

use crate::load::{Entry, Manifest};

/// Width of the abstract preview line.
const ABSTRACT_PREVIEW: usize = 60;

/// Format a display index as 3-digit zero-padded.
fn format_index(index: i64) -> String {
    format!("{:03}", index)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces.
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "publication" } else { "publications" }
}

/// Format one publication: header line plus indented context.
pub fn format_entry(entry: &Entry) -> Vec<String> {
    let r = &entry.record;
    let mut lines = vec![
        format!("{} {}", format_index(r.index), r.title.trim()),
        format!("    Source: {}", entry.source),
        format!("    Authors: {}", r.author_line()),
        format!("    Venue: {} {}", r.conference.trim(), r.year),
    ];
    if let Some(url) = r.doi_url() {
        lines.push(format!("    DOI: {}", url));
    }
    let preview = truncate_desc(&one_line(&r.abstract_text), ABSTRACT_PREVIEW);
    if !preview.is_empty() {
        lines.push(format!("    {}", preview));
    }
    lines
}

/// Format the full publication listing for a manifest.
pub fn format_listing(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Publications".to_string()];
    for entry in &manifest.publications {
        lines.extend(format_entry(entry));
    }
    lines.push(String::new());
    let n = manifest.publications.len();
    lines.push(format!("{} {}", n, plural(n)));
    lines
}

/// Closing line for the `check` command.
pub fn format_check_summary(manifest: &Manifest) -> String {
    let n = manifest.publications.len();
    let verb = if n == 1 { "is" } else { "are" };
    format!("==> {} {} {} valid", n, plural(n), verb)
}

/// Print the publication listing to stdout.
pub fn print_listing(manifest: &Manifest) {
    for line in format_listing(manifest) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadConfig;
    use crate::record::PublicationRecord;

    fn entry(index: i64, doi: Option<&str>) -> Entry {
        Entry {
            source: format!("{index}.yaml"),
            record: PublicationRecord {
                index,
                title: "Fast Joins".into(),
                authors: vec!["Ada Lovelace".into(), "Alan Turing".into()],
                conference: "SIGMOD".into(),
                year: 2021,
                abstract_text: "We show that joins\ncan be fast.\n".into(),
                doi: doi.map(String::from),
            },
        }
    }

    fn manifest(entries: Vec<Entry>) -> Manifest {
        Manifest {
            publications: entries,
            config: LoadConfig::default(),
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(3), "003");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("Short text", 40), "Short text");
    }

    #[test]
    fn truncate_desc_exact() {
        let text = "a".repeat(40);
        assert_eq!(truncate_desc(&text, 40), text);
    }

    #[test]
    fn truncate_desc_long() {
        let text = "a".repeat(50);
        assert_eq!(truncate_desc(&text, 40), format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn truncate_desc_multibyte() {
        assert_eq!(truncate_desc("ééééé", 3), "ééé...");
    }

    #[test]
    fn one_line_collapses_whitespace() {
        assert_eq!(one_line("a\n  b\tc\n"), "a b c");
    }

    // =========================================================================
    // Entry and listing tests
    // =========================================================================

    #[test]
    fn entry_with_doi() {
        let lines = format_entry(&entry(3, Some("10.1145/1234567")));
        assert_eq!(
            lines,
            vec![
                "003 Fast Joins",
                "    Source: 3.yaml",
                "    Authors: Ada Lovelace and Alan Turing",
                "    Venue: SIGMOD 2021",
                "    DOI: https://doi.org/10.1145/1234567",
                "    We show that joins can be fast.",
            ]
        );
    }

    #[test]
    fn entry_without_doi_omits_line() {
        let lines = format_entry(&entry(3, None));
        assert!(lines.iter().all(|l| !l.contains("DOI")));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn listing_keeps_manifest_order() {
        let lines = format_listing(&manifest(vec![entry(1, None), entry(2, None)]));
        assert_eq!(lines[0], "Publications");
        let headers: Vec<&String> = lines.iter().filter(|l| l.ends_with("Fast Joins")).collect();
        assert_eq!(headers, vec!["001 Fast Joins", "002 Fast Joins"]);
        assert_eq!(lines.last().unwrap(), "2 publications");
    }

    #[test]
    fn empty_listing() {
        let lines = format_listing(&manifest(vec![]));
        assert_eq!(lines, vec!["Publications", "", "0 publications"]);
    }

    #[test]
    fn check_summary_singular_and_plural() {
        assert_eq!(
            format_check_summary(&manifest(vec![entry(1, None)])),
            "==> 1 publication is valid"
        );
        assert_eq!(
            format_check_summary(&manifest(vec![entry(1, None), entry(2, None)])),
            "==> 2 publications are valid"
        );
    }
}
