//! Line-scoped pattern operations
//!
//! [`execute`] takes an immutable [`OperationRequest`] and produces an
//! [`OperationResult`]: the accumulated output text plus a diff report for
//! every line that Replace changed. Nothing is printed or written here.

use crate::color::Color;
use crate::diff_formatter::DiffReport;
use crate::document::{split_terminator, Document};
use crate::error::{Result, RsedError};
use crate::flags::FlagSet;
use crate::line_selector::LineSet;
use crate::template::Template;
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// The seven operations rsed can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Replace,
    FindAll,
    Search,
    Match,
    FindLines,
    Highlight,
    Stat,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Replace,
        Operation::FindAll,
        Operation::Search,
        Operation::Match,
        Operation::FindLines,
        Operation::Highlight,
        Operation::Stat,
    ];

    /// Resolve a command-line token such as `-r` or `--replace`
    pub fn from_token(token: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| {
                let (short, long) = op.tokens();
                token == short || token == long
            })
            .ok_or_else(|| RsedError::UnrecognizedOperation(token.to_string()))
    }

    /// Short and long command-line spelling
    pub fn tokens(self) -> (&'static str, &'static str) {
        match self {
            Operation::Replace => ("-r", "--replace"),
            Operation::FindAll => ("-f", "--findall"),
            Operation::Search => ("-s", "--search"),
            Operation::Match => ("-m", "--match"),
            Operation::FindLines => ("-l", "--lines"),
            Operation::Highlight => ("-g", "--highlight"),
            Operation::Stat => ("-t", "--stat"),
        }
    }

    pub fn name(self) -> &'static str {
        &self.tokens().1[2..]
    }
}

/// Where the result text goes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    #[default]
    Stdout,
    File(PathBuf),
}

/// Everything one operation needs, fixed for the whole run
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    pub operation: Operation,
    pub document: Document,
    pub pattern: String,
    /// Replacement template, or color name for Highlight
    pub extra: String,
    pub lines: LineSet,
    /// Max substitutions for Replace (0 = all), group index for Search/Match
    pub count: usize,
    pub flags: FlagSet,
    pub destination: Destination,
}

impl OperationRequest {
    pub fn new(operation: Operation, document: Document) -> Self {
        Self {
            operation,
            document,
            pattern: String::new(),
            extra: String::new(),
            lines: LineSet::All,
            count: 0,
            flags: FlagSet::empty(),
            destination: Destination::Stdout,
        }
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    pub fn lines(mut self, lines: LineSet) -> Self {
        self.lines = lines;
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn flags(mut self, flags: FlagSet) -> Self {
        self.flags = flags;
        self
    }

    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    fn compile(&self) -> Result<Regex> {
        self.flags.build_regex(&self.pattern)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationResult {
    pub text: String,
    /// One report per line Replace changed, in line order
    pub diffs: Vec<DiffReport>,
}

/// Run the requested operation against its document
pub fn execute(request: &OperationRequest) -> Result<OperationResult> {
    info!(
        operation = request.operation.name(),
        lines = request.document.line_count(),
        "executing operation"
    );

    let result = match request.operation {
        Operation::Replace => replace(request)?,
        Operation::FindAll => find_all(request)?,
        Operation::Search => extract_group(request, false)?,
        Operation::Match => extract_group(request, true)?,
        Operation::FindLines => find_lines(request),
        Operation::Highlight => highlight(request)?,
        Operation::Stat => OperationResult {
            text: TextStats::of(&request.document)?.to_string(),
            diffs: Vec::new(),
        },
    };

    debug!(bytes = result.text.len(), diffs = result.diffs.len(), "operation finished");
    Ok(result)
}

fn replace(request: &OperationRequest) -> Result<OperationResult> {
    let re = request.compile()?;
    let template = Template::parse(&request.extra)?;
    template.validate(&re)?;

    let mut result = OperationResult::default();
    for (index, line) in request.document.lines_with_ends().enumerate() {
        let line_number = index + 1;
        if !request.lines.contains(line_number) {
            result.text.push_str(line);
            continue;
        }

        let (content, terminator) = split_terminator(line);
        let replaced = re.replacen(content, request.count, template.expansion());
        let new_line = format!("{}{}", replaced, terminator);

        if new_line != line {
            debug!(line = line_number, "line modified");
            result.diffs.push(DiffReport::between(line_number, line, &new_line));
        }
        result.text.push_str(&new_line);
    }

    Ok(result)
}

fn find_all(request: &OperationRequest) -> Result<OperationResult> {
    let re = request.compile()?;
    let groups = re.captures_len() - 1;

    let mut result = OperationResult::default();
    for (index, line) in request.document.lines().enumerate() {
        if !request.lines.contains(index + 1) {
            continue;
        }

        let found: Vec<String> = re
            .captures_iter(line)
            .map(|caps| {
                if groups == 0 {
                    caps[0].to_string()
                } else {
                    (1..=groups)
                        .map(|g| caps.get(g).map_or("", |m| m.as_str()))
                        .collect::<Vec<_>>()
                        .join(" ")
                }
            })
            .collect();
        result.text.push_str(&found.join(" "));
    }

    Ok(result)
}

/// Search (anywhere in the line) or Match (at the line start)
fn extract_group(request: &OperationRequest, anchored: bool) -> Result<OperationResult> {
    let re = request.compile()?;
    if request.count >= re.captures_len() {
        return Err(RsedError::Regex("no such group".to_string()));
    }

    let mut result = OperationResult::default();
    for (index, line) in request.document.lines().enumerate() {
        if !request.lines.contains(index + 1) {
            continue;
        }

        let Some(caps) = re.captures(line) else {
            continue;
        };
        // Leftmost match starts at 0 whenever any match at 0 exists
        if anchored && caps.get(0).is_some_and(|m| m.start() != 0) {
            continue;
        }
        if let Some(group) = caps.get(request.count) {
            result.text.push_str(group.as_str());
        }
    }

    Ok(result)
}

fn find_lines(request: &OperationRequest) -> OperationResult {
    let mut result = OperationResult::default();
    for (index, line) in request.document.lines().enumerate() {
        let line_number = index + 1;
        if line.contains(request.pattern.as_str()) {
            result.text.push_str(&format!("{} {}\n", line_number, line));
        } else {
            let placeholder = "-".repeat(line_number.to_string().len());
            result.text.push_str(&format!("{} {}\n", placeholder, line));
        }
    }
    result
}

fn highlight(request: &OperationRequest) -> Result<OperationResult> {
    let color: Color = request.extra.parse()?;
    let painted = color.paint(&request.pattern);

    Ok(OperationResult {
        text: request.document.text().replace(request.pattern.as_str(), &painted),
        diffs: Vec::new(),
    })
}

/// Counts reported by the stat operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStats {
    pub lines: usize,
    pub words: usize,
    /// Characters other than the space character
    pub chars: usize,
    pub blanks: usize,
}

impl TextStats {
    pub fn of(document: &Document) -> Result<Self> {
        let word = Regex::new(r"[\w']+")?;
        let text = document.text();

        let total = text.chars().count();
        let chars = text.chars().filter(|&c| c != ' ').count();
        let words = document.lines().map(|line| word.find_iter(line).count()).sum();

        Ok(Self {
            lines: document.line_count(),
            words,
            chars,
            blanks: total - chars,
        })
    }
}

impl fmt::Display for TextStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lines: {}, Words: {}, Chars: {}, Blanks: {}",
            self.lines, self.words, self.chars, self.blanks
        )
    }
}
