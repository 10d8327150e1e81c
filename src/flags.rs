//! Regex option flags
//!
//! Flags arrive as a `|`-delimited list of symbolic tokens such as `I|M` or
//! `IGNORECASE|DOTALL`. Each token carries a power-of-two weight and the
//! composed value is the bitwise OR of all weights.

use crate::error::{Result, RsedError};
use regex::{Regex, RegexBuilder};

/// A single regex option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexFlag {
    IgnoreCase,
    /// Accepted for compatibility; a Unicode engine has no locale mode
    Locale,
    Multiline,
    DotAll,
    Unicode,
    Verbose,
}

impl RegexFlag {
    pub fn weight(self) -> u32 {
        match self {
            RegexFlag::IgnoreCase => 2,
            RegexFlag::Locale => 4,
            RegexFlag::Multiline => 8,
            RegexFlag::DotAll => 16,
            RegexFlag::Unicode => 32,
            RegexFlag::Verbose => 64,
        }
    }

    /// Resolve a symbolic token; `Ok(None)` for the no-op tokens `0` and ``
    fn from_token(token: &str) -> Option<Option<RegexFlag>> {
        let flag = match token {
            "" | "0" => return Some(None),
            "I" | "IGNORECASE" => RegexFlag::IgnoreCase,
            "L" | "LOCALE" => RegexFlag::Locale,
            "M" | "MULTILINE" => RegexFlag::Multiline,
            "S" | "DOTALL" => RegexFlag::DotAll,
            "U" | "UNICODE" => RegexFlag::Unicode,
            "X" | "VERBOSE" => RegexFlag::Verbose,
            _ => return None,
        };
        Some(Some(flag))
    }
}

/// Composed set of regex options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagSet(u32);

impl FlagSet {
    pub fn empty() -> Self {
        Self(0)
    }

    /// Parse a flag spec like `I|M`
    ///
    /// An unknown token fails with [`RsedError::InvalidFlag`] carrying the
    /// whole spec.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut bits = 0;
        for token in spec.split('|') {
            match RegexFlag::from_token(token) {
                Some(Some(flag)) => bits |= flag.weight(),
                Some(None) => {}
                None => return Err(RsedError::InvalidFlag(spec.to_string())),
            }
        }
        Ok(Self(bits))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, flag: RegexFlag) -> bool {
        self.0 & flag.weight() != 0
    }

    /// Compile `pattern` with these options applied
    pub fn build_regex(self, pattern: &str) -> Result<Regex> {
        let re = RegexBuilder::new(pattern)
            .case_insensitive(self.contains(RegexFlag::IgnoreCase))
            .multi_line(self.contains(RegexFlag::Multiline))
            .dot_matches_new_line(self.contains(RegexFlag::DotAll))
            .ignore_whitespace(self.contains(RegexFlag::Verbose))
            .unicode(true)
            .build()?;
        Ok(re)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spec_is_zero() {
        assert_eq!(FlagSet::parse("").unwrap().bits(), 0);
        assert_eq!(FlagSet::parse("0").unwrap().bits(), 0);
    }

    #[test]
    fn test_letters_and_names() {
        assert_eq!(FlagSet::parse("I").unwrap().bits(), 2);
        assert_eq!(FlagSet::parse("IGNORECASE").unwrap().bits(), 2);
        assert_eq!(FlagSet::parse("I|M").unwrap().bits(), 10);
        assert_eq!(FlagSet::parse("L|S|U|X").unwrap().bits(), 4 | 16 | 32 | 64);
        assert_eq!(FlagSet::parse("MULTILINE|0|DOTALL").unwrap().bits(), 24);
    }

    #[test]
    fn test_duplicate_tokens_are_idempotent() {
        assert_eq!(FlagSet::parse("I|I|IGNORECASE").unwrap().bits(), 2);
    }

    #[test]
    fn test_trailing_separator() {
        assert_eq!(FlagSet::parse("I|").unwrap().bits(), 2);
    }

    #[test]
    fn test_unknown_token() {
        let err = FlagSet::parse("I|Q").unwrap_err();
        assert_eq!(err, RsedError::InvalidFlag("I|Q".to_string()));

        // Tokens are case sensitive
        assert!(FlagSet::parse("i").is_err());
    }

    #[test]
    fn test_build_regex_ignore_case() {
        let flags = FlagSet::parse("I").unwrap();
        let re = flags.build_regex("hello").unwrap();
        assert!(re.is_match("HeLLo world"));

        let plain = FlagSet::empty().build_regex("hello").unwrap();
        assert!(!plain.is_match("HELLO"));
    }

    #[test]
    fn test_build_regex_dotall_and_verbose() {
        let re = FlagSet::parse("S").unwrap().build_regex("a.b").unwrap();
        assert!(re.is_match("a\nb"));

        let re = FlagSet::parse("X").unwrap().build_regex("a b  c").unwrap();
        assert!(re.is_match("abc"));
    }

    #[test]
    fn test_build_regex_reports_engine_message() {
        let err = FlagSet::empty().build_regex("(unclosed").unwrap_err();
        assert!(matches!(err, RsedError::Regex(_)));
    }

    #[test]
    fn test_contains() {
        let flags = FlagSet::parse("M|VERBOSE").unwrap();
        assert!(flags.contains(RegexFlag::Multiline));
        assert!(flags.contains(RegexFlag::Verbose));
        assert!(!flags.contains(RegexFlag::IgnoreCase));
    }
}
