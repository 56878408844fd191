//! Builder methods for creating errors with context

use super::types::{ConfigError, Error, LookupError, ResolutionError};

impl ConfigError {
    /// Create an incompatible function shape error
    #[must_use]
    pub fn incompatible_shape(
        resolver: &'static str,
        prefix: impl Into<String>,
        shape: &'static str,
    ) -> Self {
        ConfigError::IncompatibleFunctionShape {
            resolver,
            prefix: prefix.into(),
            shape,
        }
    }

    /// Create a missing context error
    #[must_use]
    pub fn missing_context(resolver: &'static str) -> Self {
        ConfigError::MissingContext { resolver }
    }
}

impl ResolutionError {
    /// Create a not found error listing every attempted key and registered prefix
    #[must_use]
    pub fn not_found<S: AsRef<str>>(attempted_keys: &[S], registered_prefixes: Vec<String>) -> Self {
        ResolutionError::NotFound {
            attempted_keys: attempted_keys
                .iter()
                .map(|key| key.as_ref().to_string())
                .collect(),
            registered_prefixes,
        }
    }

    /// Wrap an error returned by a lookup function
    #[must_use]
    pub fn lookup(key: impl Into<String>, source: impl Into<LookupError>) -> Self {
        ResolutionError::Lookup {
            key: key.into(),
            source: source.into(),
        }
    }

    /// Create an invalid shape error
    #[must_use]
    pub fn invalid_shape(prefix: impl Into<String>, shape: &'static str) -> Self {
        ResolutionError::InvalidShape {
            prefix: prefix.into(),
            shape,
        }
    }

    /// Create a task aborted error
    #[must_use]
    pub fn task_aborted(key: impl Into<String>) -> Self {
        ResolutionError::TaskAborted { key: key.into() }
    }

    /// Whether this error only reports absence
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolutionError::NotFound { .. })
    }
}

impl Error {
    /// Create an invalid prefix error
    #[must_use]
    pub fn invalid_prefix(value: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidPrefix {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a settings error
    #[must_use]
    pub fn settings(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Settings {
            key: key.into(),
            message: message.into(),
        }
    }
}
