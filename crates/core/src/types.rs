//! Policy types shared by the resolver and the settings loader

use crate::constants::{DOT_SEPARATOR, SLASH_SEPARATOR};
use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a resolver returns when no candidate key produced a value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Report `ResolutionError::NotFound`
    #[default]
    None,
    /// Return the last candidate key verbatim, so a template can end its
    /// argument list with a literal default
    LiteralLastKey,
}

impl FallbackPolicy {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackPolicy::None => "none",
            FallbackPolicy::LiteralLastKey => "literal_last_key",
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(FallbackPolicy::None),
            "literal_last_key" | "literal" => Ok(FallbackPolicy::LiteralLastKey),
            other => Err(Error::settings(
                "fallback",
                format!("unknown fallback policy '{other}', expected 'none' or 'literal_last_key'"),
            )),
        }
    }
}

/// Separator style used when building prefixes from bare labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixStyle {
    /// `label.key`
    Dot,
    /// `label/key`
    #[default]
    Slash,
}

impl PrefixStyle {
    #[must_use]
    pub fn separator(&self) -> char {
        match self {
            PrefixStyle::Dot => DOT_SEPARATOR,
            PrefixStyle::Slash => SLASH_SEPARATOR,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixStyle::Dot => "dot",
            PrefixStyle::Slash => "slash",
        }
    }
}

impl fmt::Display for PrefixStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrefixStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dot" | "." => Ok(PrefixStyle::Dot),
            "slash" | "/" => Ok(PrefixStyle::Slash),
            other => Err(Error::settings(
                "prefix_style",
                format!("unknown prefix style '{other}', expected 'dot' or 'slash'"),
            )),
        }
    }
}
