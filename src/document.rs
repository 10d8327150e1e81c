//! Input document
//!
//! The text is trimmed of trailing whitespace once when loaded. Lines break
//! on `\r\n` and on each of [`LINE_BREAKS`]: `\n`, `\r`, vertical tab,
//! form feed, the file/group/record separators `\x1c`-`\x1e`, NEL, and the
//! Unicode line and paragraph separators.

use crate::error::{Result, RsedError};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Characters that end a line on their own
pub const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(raw: &str) -> Self {
        Self {
            text: raw.trim_end().to_string(),
        }
    }

    /// Load a document from a file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => RsedError::FileNotFound(path.display().to_string()),
            _ => RsedError::Io(format!("Failed to read {}: {}", path.display(), err)),
        })?;
        Ok(Self::new(&raw))
    }

    /// Load a document from any reader (normally stdin)
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Ok(Self::new(&raw))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Lines without their terminators
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines_with_ends().map(|line| split_terminator(line).0)
    }

    /// Lines with their original terminators kept
    pub fn lines_with_ends(&self) -> LinesWithEnds<'_> {
        LinesWithEnds { rest: &self.text }
    }
}

/// Split a line into its content and terminator (possibly empty)
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        return (content, "\r\n");
    }
    match line.char_indices().next_back() {
        Some((pos, c)) if LINE_BREAKS.contains(&c) => line.split_at(pos),
        _ => (line, ""),
    }
}

/// Split arbitrary text into lines without terminators
pub fn text_lines(text: &str) -> impl Iterator<Item = &str> {
    LinesWithEnds { rest: text }.map(|line| split_terminator(line).0)
}

/// Iterator over lines that keeps each line's terminator
pub struct LinesWithEnds<'a> {
    rest: &'a str,
}

impl<'a> Iterator for LinesWithEnds<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let end = match self.rest.find(LINE_BREAKS) {
            Some(pos) if self.rest[pos..].starts_with("\r\n") => pos + 2,
            Some(pos) => {
                let width = self.rest[pos..].chars().next().map_or(1, char::len_utf8);
                pos + width
            }
            None => self.rest.len(),
        };

        let (line, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(line)
    }
}
