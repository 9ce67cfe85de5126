//! Rendering of failure details returned by the processing API.
//!
//! The API reports column mismatches as a flat list that embeds two sub-lists:
//! `["Missing columns:", <missing..>, "---", "Available columns:", <available..>]`.
//! When all three markers are present the list is split back into its parts;
//! otherwise it is shown as-is.

use std::fmt::Write as _;

pub const MISSING_MARKER: &str = "Missing columns:";
pub const AVAILABLE_MARKER: &str = "Available columns:";
pub const SEPARATOR_MARKER: &str = "---";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailView<'a> {
    Empty,
    Flat(&'a [String]),
    Columns {
        missing: &'a [String],
        available: &'a [String],
    },
}

fn position(details: &[String], marker: &str) -> Option<usize> {
    details.iter().position(|d| d == marker)
}

pub fn classify_details(details: &[String]) -> DetailView<'_> {
    if details.is_empty() {
        return DetailView::Empty;
    }

    let markers = (
        position(details, MISSING_MARKER),
        position(details, AVAILABLE_MARKER),
        position(details, SEPARATOR_MARKER),
    );
    match markers {
        (Some(missing_at), Some(available_at), Some(separator_at)) => {
            let missing: &[String] = if separator_at > missing_at {
                &details[missing_at + 1..separator_at]
            } else {
                &[]
            };
            DetailView::Columns {
                missing,
                available: &details[available_at + 1..],
            }
        }
        _ => DetailView::Flat(details),
    }
}

fn write_numbered(out: &mut String, items: &[String]) {
    for (idx, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", idx + 1, item);
    }
}

/// Renders a failure message and its details as plain text.
pub fn render_failure(message: &str, details: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", message);

    match classify_details(details) {
        DetailView::Empty => {}
        DetailView::Flat(items) => write_numbered(&mut out, items),
        DetailView::Columns { missing, available } => {
            if !missing.is_empty() {
                let _ = writeln!(out, "{}", MISSING_MARKER);
                write_numbered(&mut out, missing);
            }
            if !available.is_empty() {
                let _ = writeln!(out, "{}", AVAILABLE_MARKER);
                write_numbered(&mut out, available);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_column_diagnostics() {
        let details = owned(&[
            "Missing columns:",
            "Age",
            "---",
            "Available columns:",
            "Name",
            "Email",
        ]);
        match classify_details(&details) {
            DetailView::Columns { missing, available } => {
                assert_eq!(missing, owned(&["Age"]).as_slice());
                assert_eq!(available, owned(&["Name", "Email"]).as_slice());
            }
            other => panic!("expected column view, got {:?}", other),
        }
    }

    #[test]
    fn missing_separator_means_flat() {
        let details = owned(&["Missing columns:", "Age", "Available columns:", "Name"]);
        assert_eq!(classify_details(&details), DetailView::Flat(&details));

        let rendered = render_failure("Column mismatch", &details);
        assert_eq!(
            rendered,
            "Column mismatch\n  1. Missing columns:\n  2. Age\n  3. Available columns:\n  4. Name\n"
        );
    }

    #[test]
    fn empty_details_render_only_the_message() {
        assert_eq!(classify_details(&[]), DetailView::Empty);
        assert_eq!(render_failure("Server exploded", &[]), "Server exploded\n");
    }

    #[test]
    fn renders_labelled_sub_lists() {
        let details = owned(&[
            "Missing columns:",
            "SKU",
            "Price",
            "---",
            "Available columns:",
            "ID",
        ]);
        assert_eq!(
            render_failure("Bad format", &details),
            "Bad format\nMissing columns:\n  1. SKU\n  2. Price\nAvailable columns:\n  1. ID\n"
        );
    }

    #[test]
    fn empty_sub_lists_are_skipped() {
        let details = owned(&["Missing columns:", "---", "Available columns:", "ID"]);
        assert_eq!(
            render_failure("Bad format", &details),
            "Bad format\nAvailable columns:\n  1. ID\n"
        );
    }

    #[test]
    fn separator_before_missing_marker_yields_no_missing_columns() {
        let details = owned(&["---", "Missing columns:", "A", "Available columns:", "B"]);
        match classify_details(&details) {
            DetailView::Columns { missing, available } => {
                assert!(missing.is_empty());
                assert_eq!(available, owned(&["B"]).as_slice());
            }
            other => panic!("expected column view, got {:?}", other),
        }
    }
}
