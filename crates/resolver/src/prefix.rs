//! Namespace prefixes that route candidate keys to lookup functions
//!
//! A prefix is a label plus a separator. `env/` claims `env/HOME` and hands
//! `HOME` to the lookup function registered under it. No case or whitespace
//! normalization is applied.

use keymux_core::{Error, PrefixStyle, DOT_SEPARATOR, SLASH_SEPARATOR};
use std::fmt;
use std::str::FromStr;

/// A namespace label and the separator that follows it in candidate keys
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefix {
    label: String,
    separator: char,
    // label + separator, precomputed for matching
    marker: String,
}

impl Prefix {
    /// Create a prefix with an arbitrary separator
    #[must_use]
    pub fn new(label: impl Into<String>, separator: char) -> Self {
        let label = label.into();
        let mut marker = String::with_capacity(label.len() + separator.len_utf8());
        marker.push_str(&label);
        marker.push(separator);
        Self {
            label,
            separator,
            marker,
        }
    }

    /// `label.key`
    #[must_use]
    pub fn dot(label: impl Into<String>) -> Self {
        Self::new(label, DOT_SEPARATOR)
    }

    /// `label/key`
    #[must_use]
    pub fn slash(label: impl Into<String>) -> Self {
        Self::new(label, SLASH_SEPARATOR)
    }

    /// Create a prefix in the given style
    #[must_use]
    pub fn with_style(label: impl Into<String>, style: PrefixStyle) -> Self {
        Self::new(label, style.separator())
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// The literal text a candidate key must start with
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether `candidate` belongs to this namespace
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.starts_with(&self.marker)
    }

    /// Remove the namespace marker, returning the bare key.
    ///
    /// Keys that do not match are returned unchanged.
    #[must_use]
    pub fn strip<'a>(&self, candidate: &'a str) -> &'a str {
        candidate.strip_prefix(self.marker.as_str()).unwrap_or(candidate)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.marker)
    }
}

/// Parses `label.` or `label/` notation
impl FromStr for Prefix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(separator) = s.chars().last() else {
            return Err(Error::invalid_prefix(s, "prefix is empty"));
        };
        if separator != DOT_SEPARATOR && separator != SLASH_SEPARATOR {
            return Err(Error::invalid_prefix(
                s,
                format!("prefix must end with '{DOT_SEPARATOR}' or '{SLASH_SEPARATOR}'"),
            ));
        }
        let label = &s[..s.len() - separator.len_utf8()];
        if label.is_empty() {
            return Err(Error::invalid_prefix(s, "label is empty"));
        }
        Ok(Self::new(label, separator))
    }
}
