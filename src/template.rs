//! Replacement templates
//!
//! Templates use backslash syntax for group references:
//! - `\1`..`\99` - numbered group
//! - `\g<name>`, `\g<2>` - named or numbered group
//! - `\n`, `\t`, `\r`, `\f`, `\v`, `\a`, `\b` - control characters
//! - `\\` - literal backslash
//!
//! A bare `$` is literal. Templates are translated into the `$`-based
//! syntax of the `regex` crate before substitution.

use crate::error::{Result, RsedError};
use regex::Regex;

/// A group referenced from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupRef {
    Index(usize),
    Name(String),
}

/// A replacement template translated for the regex engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    expansion: String,
    refs: Vec<GroupRef>,
}

impl Template {
    pub fn parse(template: &str) -> Result<Self> {
        let mut expansion = String::with_capacity(template.len());
        let mut refs = Vec::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '$' => expansion.push_str("$$"),
                '\\' => {
                    let Some(next) = chars.next() else {
                        return Err(RsedError::Regex("bad escape (end of pattern)".to_string()));
                    };
                    match next {
                        '1'..='9' => {
                            let mut digits = next.to_string();
                            if let Some(&d) = chars.peek() {
                                if d.is_ascii_digit() {
                                    digits.push(d);
                                    chars.next();
                                }
                            }
                            let index = digits.parse::<usize>().map_err(|e| RsedError::Regex(e.to_string()))?;
                            push_group(&mut expansion, &digits);
                            refs.push(GroupRef::Index(index));
                        }
                        '0' => expansion.push('\0'),
                        'g' => {
                            let name = parse_group_name(&mut chars)?;
                            push_group(&mut expansion, &name);
                            refs.push(match name.parse::<usize>() {
                                Ok(index) => GroupRef::Index(index),
                                Err(_) => GroupRef::Name(name),
                            });
                        }
                        '\\' => expansion.push('\\'),
                        'n' => expansion.push('\n'),
                        't' => expansion.push('\t'),
                        'r' => expansion.push('\r'),
                        'f' => expansion.push('\x0c'),
                        'v' => expansion.push('\x0b'),
                        'a' => expansion.push('\x07'),
                        'b' => expansion.push('\x08'),
                        other if other.is_ascii_alphabetic() => {
                            return Err(RsedError::Regex(format!("bad escape \\{}", other)));
                        }
                        other => {
                            expansion.push('\\');
                            if other == '$' {
                                expansion.push_str("$$");
                            } else {
                                expansion.push(other);
                            }
                        }
                    }
                }
                _ => expansion.push(c),
            }
        }

        Ok(Self { expansion, refs })
    }

    /// Template text in the regex crate's expansion syntax
    pub fn expansion(&self) -> &str {
        &self.expansion
    }

    /// Check every group reference exists in `re`
    pub fn validate(&self, re: &Regex) -> Result<()> {
        for group in &self.refs {
            match group {
                GroupRef::Index(index) if *index >= re.captures_len() => {
                    return Err(RsedError::Regex(format!("invalid group reference {}", index)));
                }
                GroupRef::Name(name) if !re.capture_names().flatten().any(|n| n == name) => {
                    return Err(RsedError::Regex(format!("unknown group name '{}'", name)));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn push_group(expansion: &mut String, group: &str) {
    expansion.push_str("${");
    expansion.push_str(group);
    expansion.push('}');
}

fn parse_group_name(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<String> {
    if chars.next() != Some('<') {
        return Err(RsedError::Regex("missing <".to_string()));
    }
    let mut name = String::new();
    for c in chars.by_ref() {
        if c == '>' {
            if name.is_empty() {
                return Err(RsedError::Regex("missing group name".to_string()));
            }
            if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(RsedError::Regex(format!("bad character in group name '{}'", name)));
            }
            return Ok(name);
        }
        name.push(c);
    }
    Err(RsedError::Regex("missing >, unterminated name".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let t = Template::parse("bar").unwrap();
        assert_eq!(t.expansion(), "bar");
        assert!(t.refs.is_empty());
    }

    #[test]
    fn test_numbered_groups() {
        let t = Template::parse(r"\2-\1").unwrap();
        assert_eq!(t.expansion(), "${2}-${1}");
        assert_eq!(t.refs, vec![GroupRef::Index(2), GroupRef::Index(1)]);

        let t = Template::parse(r"\12x").unwrap();
        assert_eq!(t.expansion(), "${12}x");
    }

    #[test]
    fn test_named_groups() {
        let t = Template::parse(r"<\g<word>>").unwrap();
        assert_eq!(t.expansion(), "<${word}>");
        assert_eq!(t.refs, vec![GroupRef::Name("word".to_string())]);

        let t = Template::parse(r"\g<1>0").unwrap();
        assert_eq!(t.expansion(), "${1}0");
        assert_eq!(t.refs, vec![GroupRef::Index(1)]);
    }

    #[test]
    fn test_dollar_is_literal() {
        let t = Template::parse("$1 costs $").unwrap();
        assert_eq!(t.expansion(), "$$1 costs $$");
    }

    #[test]
    fn test_escapes() {
        let t = Template::parse(r"a\tb\nc\\d").unwrap();
        assert_eq!(t.expansion(), "a\tb\nc\\d");

        let t = Template::parse(r"\.").unwrap();
        assert_eq!(t.expansion(), r"\.");
    }

    #[test]
    fn test_bad_escapes() {
        assert!(Template::parse(r"\q").is_err());
        assert!(Template::parse("trailing\\").is_err());
        assert!(Template::parse(r"\g<>").is_err());
        assert!(Template::parse(r"\g<open").is_err());
        assert!(Template::parse(r"\gx").is_err());
    }

    #[test]
    fn test_validate_against_regex() {
        let re = Regex::new(r"(?P<word>\w+) (\d+)").unwrap();
        assert!(Template::parse(r"\1 \2 \g<word>").unwrap().validate(&re).is_ok());

        let err = Template::parse(r"\3").unwrap().validate(&re).unwrap_err();
        assert_eq!(err, RsedError::Regex("invalid group reference 3".to_string()));

        assert!(Template::parse(r"\g<nope>").unwrap().validate(&re).is_err());
    }
}
