//! Error kinds for rsed operations
//!
//! Every error is terminal for the current invocation. The library returns
//! them as values; only the binary turns them into an exit status.

use thiserror::Error;

/// All the ways an rsed invocation can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RsedError {
    #[error("Too few arguments")]
    TooFewArguments,

    #[error("Too many arguments")]
    TooManyArguments,

    #[error("'{0}' argument does not recognized")]
    UnrecognizedOperation(String),

    #[error("No such file or directory {0}")]
    FileNotFound(String),

    #[error("'{0}' flag doesn't exist")]
    InvalidFlag(String),

    #[error("'{0}' color doesn't exist")]
    InvalidColor(String),

    /// Message from the regex engine, surfaced verbatim
    #[error("{0}")]
    Regex(String),

    #[error("{0}")]
    Io(String),
}

impl RsedError {
    /// Whether the usage line should be shown alongside this error
    pub fn wants_usage(&self) -> bool {
        !matches!(self, RsedError::Regex(_) | RsedError::Io(_))
    }
}

impl From<regex::Error> for RsedError {
    fn from(err: regex::Error) -> Self {
        RsedError::Regex(err.to_string())
    }
}

impl From<std::io::Error> for RsedError {
    fn from(err: std::io::Error) -> Self {
        RsedError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RsedError>;
