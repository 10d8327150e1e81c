//! Highlight palette

use crate::error::{Result, RsedError};
use std::str::FromStr;

/// Escape sequence that ends a highlight
pub const RESET: &str = "\x1b[0m";

/// Colors available to the highlight operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    /// ANSI foreground escape for this color
    pub fn escape(self) -> &'static str {
        match self {
            Color::Black => "\x1b[30m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
        }
    }

    /// Wrap `text` in this color and a reset
    pub fn paint(self, text: &str) -> String {
        format!("{}{}{}", self.escape(), text, RESET)
    }
}

impl FromStr for Color {
    type Err = RsedError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "black" => Ok(Color::Black),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            "magenta" => Ok(Color::Magenta),
            "cyan" => Ok(Color::Cyan),
            other => Err(RsedError::InvalidColor(other.to_string())),
        }
    }
}
