//! Command-line interface
//!
//! clap collects the raw operands; [`Invocation::from_operands`] validates
//! their count and position and splits the `LINES/COUNT/FLAGS` operand.
//! Flags and the line selector are resolved in [`Invocation::into_request`].

use crate::document::Document;
use crate::engine::{Destination, Operation, OperationRequest};
use crate::error::{Result, RsedError};
use crate::flags::FlagSet;
use crate::line_selector::LineSet;
use clap::Parser;
use std::path::PathBuf;

/// Write destination when the document came from a pipe
pub const PIPE_OUTPUT: &str = "rsed.log";

pub const USAGE: &str = "usage: rsed [-h] [-V] [-r] [-f] [-s] [-m] [-l] [-g] [-t] \
[PATTERN] [REPLACE] [LINES/COUNT/FLAGS] [FILE] [-w]";

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

License: MIT
Rust Edition: 2024"
);

#[derive(Parser)]
#[command(name = "rsed")]
#[command(about = "Line-scoped regex transformations for files and pipes")]
#[command(long_about = "rsed applies one regular-expression operation to a document.

The document is read from FILE, or from stdin when input is piped.
The result is printed to stdout, or written back with a trailing -w.

OPERATIONS:
  -r, --replace     Replace PATTERN with REPLACE (\\1, \\g<name> refer to groups)
  -f, --findall     Print every match of PATTERN
  -s, --search      Print group COUNT of the first match on each line
  -m, --match       Like --search, but the match must start the line
  -l, --lines       Number the lines containing PATTERN
  -g, --highlight   Color every occurrence of PATTERN (color name as REPLACE)
  -t, --stat        Print line, word, character and blank counts

LINES/COUNT/FLAGS:
  LINES   Line numbers to operate on, e.g. '2,4,9' (default: all lines)
  COUNT   Max substitutions per line for --replace (0 = all),
          group number for --search and --match
  FLAGS   Regex flags joined by '|': I, L, M, S, U, X
          or IGNORECASE, LOCALE, MULTILINE, DOTALL, UNICODE, VERBOSE

COLORS:
  black, red, green, yellow, blue, magenta, cyan

EXAMPLES:
  rsed -r foo bar file.txt                 Replace foo with bar, print result
  rsed -r foo bar file.txt -w              Replace and write file.txt back
  rsed -r foo bar '1,3/1/I' file.txt       Lines 1 and 3, once per line, ignore case
  cat file.txt | rsed -f '[0-9]+'          Find all numbers from a pipe
  rsed -s '(\\w+)@' '' '/1' file.txt        Print the user part of addresses
  rsed -l TODO file.txt                    Mark lines containing TODO
  rsed -g error red log.txt                Highlight 'error' in red
  rsed -t file.txt                         Text statistics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
struct Cli {
    /// Operation followed by its operands
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    operands: Vec<String>,
}

#[derive(Debug)]
pub struct Args {
    pub operands: Vec<String>,
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();
    Args {
        operands: cli.operands,
    }
}

fn is_write_token(token: &str) -> bool {
    token == "-w" || token == "--write"
}

/// Validated command-line operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub operation: Operation,
    pub pattern: String,
    pub extra: String,
    /// Line selector spec, if one was given
    pub lines: Option<String>,
    pub count: usize,
    pub flags: String,
    /// Input file; `None` when the document comes from stdin
    pub file: Option<PathBuf>,
    pub write: bool,
}

impl Invocation {
    /// Interpret `OPERATION [PATTERN] [EXTRA] [LINES/COUNT/FLAGS] [FILE] [-w]`
    ///
    /// When `piped` is false the last operand names the input file.
    pub fn from_operands(mut operands: Vec<String>, piped: bool) -> Result<Self> {
        let Some(first) = operands.first() else {
            return Err(RsedError::TooFewArguments);
        };
        let operation = Operation::from_token(first)?;

        if operands.len() > 6 {
            return Err(RsedError::TooManyArguments);
        }

        let write = operands.last().is_some_and(|last| is_write_token(last));
        if write {
            operands.pop();
        } else if operands.len() == 6 {
            let last = operands.pop().unwrap_or_default();
            return Err(RsedError::UnrecognizedOperation(last));
        }

        let file = if piped {
            None
        } else {
            if operands.len() < 2 {
                return Err(RsedError::TooFewArguments);
            }
            operands.pop().map(PathBuf::from)
        };

        if operands.len() > 4 {
            return Err(RsedError::TooManyArguments);
        }

        let mut rest = operands.into_iter().skip(1);
        let pattern = rest.next().unwrap_or_default();
        let extra = rest.next().unwrap_or_default();
        let advanced = rest.next().unwrap_or_default();

        let parts: Vec<&str> = advanced.split('/').collect();
        if parts.len() > 3 {
            return Err(RsedError::TooManyArguments);
        }

        let lines = parts
            .first()
            .filter(|spec| !spec.is_empty())
            .map(|spec| spec.to_string());
        let count = parts
            .get(1)
            .and_then(|count| count.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let flags = parts.get(2).map(|flags| flags.to_string()).unwrap_or_default();

        Ok(Self {
            operation,
            pattern,
            extra,
            lines,
            count,
            flags,
            file,
            write,
        })
    }

    /// Where results go: back to the input file, or [`PIPE_OUTPUT`] for piped input
    pub fn destination(&self) -> Destination {
        if !self.write {
            return Destination::Stdout;
        }
        Destination::File(self.file.clone().unwrap_or_else(|| PathBuf::from(PIPE_OUTPUT)))
    }

    /// Resolve flags and line selector into an immutable request
    pub fn into_request(self, document: Document) -> Result<OperationRequest> {
        let flags = FlagSet::parse(&self.flags)?;
        let lines = LineSet::parse(self.lines.as_deref());
        let destination = self.destination();

        Ok(OperationRequest::new(self.operation, document)
            .pattern(self.pattern)
            .extra(self.extra)
            .lines(lines)
            .count(self.count)
            .flags(flags)
            .destination(destination))
    }
}
