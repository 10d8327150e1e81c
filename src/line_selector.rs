//! Line selection
//!
//! A selector like `2,4,9` or `1-3` picks the 1-based lines an operation
//! applies to. Any non-digit character separates numbers, so ranges are not
//! expanded: `1-3` selects lines 1 and 3. Numbers too large for `usize`
//! saturate, so they are kept but never match a line.

use std::collections::BTreeSet;

/// The set of lines an operation applies to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LineSet {
    /// Every line of the document
    #[default]
    All,
    /// Only these line numbers (never empty, never just zero)
    Lines(BTreeSet<usize>),
}

impl LineSet {
    /// Resolve an optional selector into a line set
    ///
    /// Selectors without numbers, or with only zeros, fall back to
    /// [`LineSet::All`]. Numbers are not checked against the document length.
    pub fn parse(spec: Option<&str>) -> Self {
        let Some(spec) = spec else {
            return LineSet::All;
        };

        let numbers: BTreeSet<usize> = spec
            .split(|c: char| !c.is_ascii_digit())
            .filter(|run| !run.is_empty())
            .map(|run| run.parse::<usize>().unwrap_or(usize::MAX))
            .collect();

        if numbers.iter().all(|&n| n == 0) {
            LineSet::All
        } else {
            LineSet::Lines(numbers)
        }
    }

    pub fn contains(&self, line_number: usize) -> bool {
        match self {
            LineSet::All => true,
            LineSet::Lines(lines) => lines.contains(&line_number),
        }
    }
}
