//! rsed: line-scoped regex transformations
//!
//! The library holds the operation engine and its collaborators so they can
//! be exercised directly by tests. The binary is at src/main.rs.

pub mod cli;
pub mod color;
pub mod config;
pub mod diff_formatter;
pub mod document;
pub mod engine;
pub mod error;
pub mod flags;
pub mod line_selector;
pub mod logger;
pub mod output;
pub mod template;

// Re-export commonly used types for convenience
pub use color::Color;
pub use diff_formatter::{DiffFormatter, DiffLine, DiffReport, DiffTag};
pub use document::Document;
pub use engine::{execute, Destination, Operation, OperationRequest, OperationResult, TextStats};
pub use error::RsedError;
pub use flags::{FlagSet, RegexFlag};
pub use line_selector::LineSet;
pub use output::OutputSink;
