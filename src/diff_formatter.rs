//! Diff reports for mutated lines
//!
//! A report compares a line before and after substitution. Newlines are
//! shown as visible `\n` escapes, trailing whitespace is ignored, and
//! changed columns of a replaced line get an ndiff-style `?` hint line.

use colored::*;
use similar::{Algorithm, ChangeTag, TextDiff};
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    Unchanged,
    Removed,
    Added,
    /// Column markers under the preceding removed or added line
    Hint,
}

impl DiffTag {
    fn prefix(self) -> &'static str {
        match self {
            DiffTag::Unchanged => "  ",
            DiffTag::Removed => "- ",
            DiffTag::Added => "+ ",
            DiffTag::Hint => "? ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub tag: DiffTag,
    pub content: String,
}

/// Classified comparison of one line before and after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    pub line_number: usize,
    pub lines: Vec<DiffLine>,
}

/// Render line terminators as visible escapes
fn show_newlines(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

impl DiffReport {
    pub fn between(line_number: usize, original: &str, modified: &str) -> Self {
        let original = show_newlines(original);
        let modified = show_newlines(modified);
        let old = trimmed_lines(&original);
        let new = trimmed_lines(&modified);

        let diff = TextDiff::configure()
            .algorithm(Algorithm::Lcs)
            .diff_slices(old.as_slice(), new.as_slice());

        let mut lines = Vec::new();
        for op in diff.ops() {
            let mut removed = Vec::new();
            let mut added = Vec::new();
            for change in diff.iter_changes(op) {
                let content = change.value().to_string();
                match change.tag() {
                    ChangeTag::Equal => lines.push(DiffLine { tag: DiffTag::Unchanged, content }),
                    ChangeTag::Delete => removed.push(content),
                    ChangeTag::Insert => added.push(content),
                }
            }

            // Pair up replaced lines so each side can carry a column hint
            if removed.len() == added.len() && !removed.is_empty() {
                for (old_line, new_line) in removed.iter().zip(&added) {
                    let (old_hint, new_hint) = column_hints(old_line, new_line);
                    lines.push(DiffLine { tag: DiffTag::Removed, content: old_line.clone() });
                    if !old_hint.is_empty() {
                        lines.push(DiffLine { tag: DiffTag::Hint, content: old_hint });
                    }
                    lines.push(DiffLine { tag: DiffTag::Added, content: new_line.clone() });
                    if !new_hint.is_empty() {
                        lines.push(DiffLine { tag: DiffTag::Hint, content: new_hint });
                    }
                }
            } else {
                lines.extend(removed.into_iter().map(|content| DiffLine { tag: DiffTag::Removed, content }));
                lines.extend(added.into_iter().map(|content| DiffLine { tag: DiffTag::Added, content }));
            }
        }

        Self { line_number, lines }
    }
}

fn trimmed_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim_end).collect()
}

/// Marker lines for the removed and the added side of a replaced line
fn column_hints(old: &str, new: &str) -> (String, String) {
    let diff = TextDiff::from_chars(old, new);
    let mut old_hint = String::new();
    let mut new_hint = String::new();

    for change in diff.iter_all_changes() {
        let width = change.value().chars().count();
        match change.tag() {
            ChangeTag::Equal => {
                old_hint.push_str(&" ".repeat(width));
                new_hint.push_str(&" ".repeat(width));
            }
            ChangeTag::Delete => old_hint.push_str(&"-".repeat(width)),
            ChangeTag::Insert => new_hint.push_str(&"+".repeat(width)),
        }
    }

    (old_hint.trim_end().to_string(), new_hint.trim_end().to_string())
}

pub struct DiffFormatter;

impl DiffFormatter {
    /// Auto-detect if diff output on stderr should use colors
    pub fn should_use_color() -> bool {
        // Check NO_COLOR env var (https://no-color.org/)
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }

        std::io::stderr().is_terminal()
    }

    pub fn format_report(report: &DiffReport, use_color: bool) -> String {
        let mut output = String::new();

        if use_color {
            output.push_str(&format!("{}\n", format!("L{}:", report.line_number).bold().cyan()));
        } else {
            output.push_str(&format!("L{}:\n", report.line_number));
        }

        for line in &report.lines {
            let text = format!("{}{}", line.tag.prefix(), line.content);
            if use_color {
                let colored_line = match line.tag {
                    DiffTag::Unchanged => text.normal(),
                    DiffTag::Removed => text.red(),
                    DiffTag::Added => text.green(),
                    DiffTag::Hint => text.cyan().dimmed(),
                };
                output.push_str(&format!("{}\n", colored_line));
            } else {
                output.push_str(&text);
                output.push('\n');
            }
        }

        output
    }

    /// Format every report followed by a change total
    pub fn format_reports(reports: &[DiffReport], use_color: bool) -> String {
        let mut output = String::new();
        for report in reports {
            output.push_str(&Self::format_report(report, use_color));
        }

        let total = reports.len();
        if total > 0 {
            let plural = if total == 1 { "" } else { "s" };
            if use_color {
                output.push_str(&format!(
                    "\nTotal: {} line{} modified\n",
                    total.to_string().bold().white(),
                    plural
                ));
            } else {
                output.push_str(&format!("\nTotal: {} line{} modified\n", total, plural));
            }
        }

        output
    }
}
