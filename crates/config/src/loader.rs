//! Settings loader
//!
//! Layers are applied in a fixed order: built-in defaults, then the JSON
//! document (if any), then `KEYMUX_*` environment variables.

use crate::settings::Settings;
use keymux_core::{
    constants::{KEYMUX_FALLBACK_VAR, KEYMUX_LOG_VAR, KEYMUX_PREFIX_STYLE_VAR},
    Result, ResultExt,
};

/// Builder that produces an immutable [`Settings`] at startup
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    /// Raw JSON settings document
    document: Option<String>,
    /// Whether `KEYMUX_*` variables override the document
    read_env: bool,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Create a loader that reads the process environment and no document
    pub fn new() -> Self {
        Self {
            document: None,
            read_env: true,
        }
    }

    /// Layer a JSON settings document over the defaults
    pub fn document(mut self, json: impl Into<String>) -> Self {
        self.document = Some(json.into());
        self
    }

    /// Set whether environment variables are consulted
    pub fn read_env(mut self, read_env: bool) -> Self {
        self.read_env = read_env;
        self
    }

    /// Load settings from the process environment
    pub fn load(self) -> Result<Settings> {
        self.load_with(|name| std::env::var(name).ok())
    }

    /// Load settings, reading environment variables through `env`
    pub fn load_with<F>(self, env: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match &self.document {
            Some(json) => serde_json::from_str::<Settings>(json)
                .context("failed to parse settings document")?,
            None => Settings::default(),
        };

        if !self.read_env {
            return Ok(settings);
        }

        if let Some(filter) = non_empty(env(KEYMUX_LOG_VAR)) {
            tracing::debug!(%filter, "log filter overridden from {}", KEYMUX_LOG_VAR);
            settings.log_filter = filter;
        }
        if let Some(fallback) = non_empty(env(KEYMUX_FALLBACK_VAR)) {
            settings.fallback = fallback
                .parse()
                .with_context(|| format!("invalid {KEYMUX_FALLBACK_VAR}"))?;
        }
        if let Some(style) = non_empty(env(KEYMUX_PREFIX_STYLE_VAR)) {
            settings.prefix_style = style
                .parse()
                .with_context(|| format!("invalid {KEYMUX_PREFIX_STYLE_VAR}"))?;
        }

        Ok(settings)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keymux_core::{Error, FallbackPolicy, PrefixStyle};
    use serial_test::serial;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_document_or_env() {
        let settings = SettingsLoader::new().load_with(|_| None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings = SettingsLoader::new()
            .document(r#"{"prefix_style": "dot"}"#)
            .load_with(|_| None)
            .unwrap();
        assert_eq!(settings.prefix_style, PrefixStyle::Dot);
        assert_eq!(settings.fallback, FallbackPolicy::None);
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_env_overrides_document() {
        let settings = SettingsLoader::new()
            .document(r#"{"log_filter": "warn", "fallback": "none"}"#)
            .load_with(env_from(&[
                ("KEYMUX_LOG", "keymux_resolver=debug"),
                ("KEYMUX_FALLBACK", "literal_last_key"),
            ]))
            .unwrap();
        assert_eq!(settings.log_filter, "keymux_resolver=debug");
        assert_eq!(settings.fallback, FallbackPolicy::LiteralLastKey);
        assert_eq!(settings.prefix_style, PrefixStyle::Slash);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let settings = SettingsLoader::new()
            .load_with(env_from(&[("KEYMUX_LOG", "  "), ("KEYMUX_PREFIX_STYLE", "")]))
            .unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_read_env_false_skips_overrides() {
        let settings = SettingsLoader::new()
            .read_env(false)
            .load_with(env_from(&[("KEYMUX_PREFIX_STYLE", "dot")]))
            .unwrap();
        assert_eq!(settings.prefix_style, PrefixStyle::Slash);
    }

    #[test]
    fn test_invalid_env_value_is_reported_with_context() {
        let err = SettingsLoader::new()
            .load_with(env_from(&[("KEYMUX_PREFIX_STYLE", "colon")]))
            .unwrap_err();
        match err {
            Error::Context { message, source } => {
                assert_eq!(message, "invalid KEYMUX_PREFIX_STYLE");
                assert!(matches!(*source, Error::Settings { ref key, .. } if key == "prefix_style"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_document_is_reported() {
        let err = SettingsLoader::new()
            .document("{not json")
            .load_with(|_| None)
            .unwrap_err();
        match err {
            Error::Context { message, source } => {
                assert_eq!(message, "failed to parse settings document");
                assert!(matches!(*source, Error::Json { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_load_reads_process_environment() {
        std::env::set_var("KEYMUX_FALLBACK", "literal");
        std::env::set_var("KEYMUX_PREFIX_STYLE", "dot");
        let result = SettingsLoader::new().load();
        std::env::remove_var("KEYMUX_FALLBACK");
        std::env::remove_var("KEYMUX_PREFIX_STYLE");

        let settings = result.unwrap();
        assert_eq!(settings.fallback, FallbackPolicy::LiteralLastKey);
        assert_eq!(settings.prefix_style, PrefixStyle::Dot);
    }
}
