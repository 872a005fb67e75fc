//! Button selectors

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use std::fmt;

/// How a tap names its button
#[derive(Debug, Clone)]
pub enum Selector {
    /// Exact, case-sensitive title
    Title(String),
    Pattern(TitlePattern),
}

impl Selector {
    /// Pattern selector from a regex source and JS-style flags
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPattern`] for an unknown flag or a bad regex.
    pub fn pattern(source: &str, flags: &str) -> Result<Self> {
        TitlePattern::new(source, flags).map(Self::Pattern)
    }

    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        match self {
            Self::Title(expected) => expected == title,
            Self::Pattern(pattern) => pattern.regex.is_match(title),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(title) => f.write_str(title),
            Self::Pattern(pattern) => fmt::Display::fmt(pattern, f),
        }
    }
}

impl From<&str> for Selector {
    fn from(title: &str) -> Self {
        Self::Title(title.to_string())
    }
}

impl From<String> for Selector {
    fn from(title: String) -> Self {
        Self::Title(title)
    }
}

impl From<Regex> for Selector {
    fn from(regex: Regex) -> Self {
        Self::Pattern(TitlePattern {
            source: regex.as_str().to_string(),
            flags: String::new(),
            regex,
        })
    }
}

impl From<TitlePattern> for Selector {
    fn from(pattern: TitlePattern) -> Self {
        Self::Pattern(pattern)
    }
}

/// Compiled title pattern that remembers how it was written
#[derive(Debug, Clone)]
pub struct TitlePattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl TitlePattern {
    /// Compile `source` with flags out of `imsxugy`
    ///
    /// `u` is accepted as a no-op since regexes are always Unicode-aware;
    /// `g` and `y` have no meaning for a single match and are ignored.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPattern`] for an unknown flag or a bad regex.
    pub fn new(source: &str, flags: &str) -> Result<Self> {
        let mut builder = RegexBuilder::new(source);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'x' => {
                    builder.ignore_whitespace(true);
                }
                'u' | 'g' | 'y' => {}
                other => {
                    return Err(Error::InvalidPattern(format!(
                        "unsupported flag '{other}' in /{source}/{flags}"
                    )))
                }
            }
        }
        let regex = builder
            .build()
            .map_err(|e| Error::InvalidPattern(e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            flags: flags.to_string(),
            regex,
        })
    }

    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl fmt::Display for TitlePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Selector::from("Да").to_string(), "Да");
        assert_eq!(Selector::pattern("помощь", "i").unwrap().to_string(), "/помощь/i");
        assert_eq!(Selector::from(Regex::new("^a+$").unwrap()).to_string(), "/^a+$/");
    }

    #[test]
    fn test_flags() {
        assert!(Selector::pattern("ДА", "i").unwrap().matches("да"));
        assert!(!Selector::pattern("ДА", "").unwrap().matches("да"));
        assert!(Selector::pattern("^нет$", "m").unwrap().matches("да\nнет"));
        assert!(Selector::pattern("д a", "x").unwrap().matches("дa"));
        assert!(Selector::pattern("д", "gu").is_ok());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = Selector::pattern("д", "q").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_bad_regex_rejected() {
        assert!(matches!(
            Selector::pattern("(", ""),
            Err(Error::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_pattern_is_unanchored() {
        assert!(Selector::pattern("о", "").unwrap().matches("Помощь"));
    }
}
