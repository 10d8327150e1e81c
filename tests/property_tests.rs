//! Property-based tests for rsed
//!
//! These use proptest to check invariants of the operation engine over
//! generated documents, selectors and flag specs.

use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

use rsed::document::text_lines;
use rsed::output::write_lines;
use rsed::{execute, Color, Document, FlagSet, LineSet, Operation, OperationRequest, TextStats};

use proptest::prelude::*;

const FLAG_TOKENS: [(&str, u32); 13] = [
    ("I", 2),
    ("L", 4),
    ("M", 8),
    ("S", 16),
    ("U", 32),
    ("X", 64),
    ("IGNORECASE", 2),
    ("LOCALE", 4),
    ("MULTILINE", 8),
    ("DOTALL", 16),
    ("UNICODE", 32),
    ("VERBOSE", 64),
    ("0", 0),
];

fn document_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z ]{0,30}", 1..40)
}

// ============================================================================
// Replace
// ============================================================================

proptest! {
    /// A pattern that never matches leaves the document untouched
    #[test]
    fn prop_replace_without_matches_is_identity(lines in document_lines()) {
        let document = Document::new(&lines.join("\n"));
        let request = OperationRequest::new(Operation::Replace, document.clone())
            .pattern("[0-9]+")
            .extra("NUM");

        let result = execute(&request).unwrap();
        prop_assert_eq!(result.text.as_str(), document.text());
        prop_assert!(result.diffs.is_empty());
    }

    /// Lines outside the selector are copied verbatim
    #[test]
    fn prop_replace_only_touches_selected_lines(
        lines in prop::collection::vec("[a-c]{1,10}", 1..30),
        selected in prop::collection::btree_set(1usize..40, 1..5)
    ) {
        let document = Document::new(&lines.join("\n"));
        let request = OperationRequest::new(Operation::Replace, document.clone())
            .pattern("a")
            .extra("Z")
            .lines(LineSet::Lines(selected.clone()));

        let result = execute(&request).unwrap();
        let before: Vec<&str> = document.lines().collect();
        let after: Vec<&str> = text_lines(&result.text).collect();
        prop_assert_eq!(before.len(), after.len());

        for (index, (old, new)) in before.iter().zip(&after).enumerate() {
            if selected.contains(&(index + 1)) {
                prop_assert_eq!(old.replace('a', "Z"), *new);
            } else {
                prop_assert_eq!(old, new);
            }
        }

        for report in &result.diffs {
            prop_assert!(selected.contains(&report.line_number));
        }
    }

    /// Writing the result and reading it back gives the same lines, each newline-terminated
    #[test]
    fn prop_written_output_round_trips(lines in document_lines()) {
        let document = Document::new(&lines.join("\r\n"));
        let request = OperationRequest::new(Operation::Replace, document)
            .pattern("e")
            .extra("E");
        let result = execute(&request).unwrap();

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        write_lines(&path, &result.text).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let expected: String = text_lines(&result.text).map(|line| format!("{}\n", line)).collect();
        prop_assert_eq!(written, expected);
    }
}

// ============================================================================
// Flags and line selection
// ============================================================================

proptest! {
    /// Composed flags are the OR of token weights, whatever the order
    #[test]
    fn prop_flags_compose_by_or(
        tokens in prop::sample::subsequence(FLAG_TOKENS.to_vec(), 0..=FLAG_TOKENS.len())
            .prop_shuffle()
    ) {
        let spec = tokens.iter().map(|(name, _)| *name).collect::<Vec<_>>().join("|");
        let expected = tokens.iter().fold(0, |acc, (_, weight)| acc | weight);
        prop_assert_eq!(FlagSet::parse(&spec).unwrap().bits(), expected);
    }

    /// Explicit line numbers come back as a set, unless they are all zero
    #[test]
    fn prop_line_selector_collects_numbers(
        numbers in prop::collection::vec(0usize..500, 1..20),
        separator in "[,; /-]"
    ) {
        let spec = numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(&separator);
        let set = LineSet::parse(Some(&spec));

        let unique: BTreeSet<usize> = numbers.iter().copied().collect();
        if unique.iter().all(|&n| n == 0) {
            prop_assert_eq!(set, LineSet::All);
        } else {
            prop_assert_eq!(set, LineSet::Lines(unique));
        }
    }
}

// ============================================================================
// Read-only operations
// ============================================================================

proptest! {
    /// FindLines emits exactly one marked line per document line
    #[test]
    fn prop_find_lines_marks_every_line(lines in document_lines(), pattern in "[a-z]{1,2}") {
        let document = Document::new(&lines.join("\n"));
        let request = OperationRequest::new(Operation::FindLines, document.clone()).pattern(pattern.clone());
        let result = execute(&request).unwrap();

        let marked: Vec<&str> = text_lines(&result.text).collect();
        prop_assert_eq!(marked.len(), document.line_count());

        for (index, (marked, line)) in marked.iter().zip(document.lines()).enumerate() {
            let number = (index + 1).to_string();
            let prefix = if line.contains(pattern.as_str()) {
                number
            } else {
                "-".repeat(number.len())
            };
            prop_assert_eq!(marked.to_string(), format!("{} {}", prefix, line));
        }
    }

    /// Removing the highlight escapes restores the original text
    #[test]
    fn prop_highlight_is_reversible(lines in document_lines(), pattern in "[a-z]{1,3}") {
        let document = Document::new(&lines.join("\n"));
        let request = OperationRequest::new(Operation::Highlight, document.clone())
            .pattern(pattern.clone())
            .extra("green");
        let result = execute(&request).unwrap();

        let painted = Color::Green.paint(&pattern);
        prop_assert_eq!(result.text.replace(&painted, &pattern), document.text());
    }

    /// Chars and blanks always add up to the document length
    #[test]
    fn prop_stat_partitions_characters(lines in document_lines()) {
        let document = Document::new(&lines.join("\n"));
        let stats = TextStats::of(&document).unwrap();
        prop_assert_eq!(stats.chars + stats.blanks, document.text().chars().count());
        prop_assert_eq!(stats.lines, document.line_count());
    }
}
