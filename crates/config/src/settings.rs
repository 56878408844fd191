//! The `Settings` struct and the resolvers it assembles

use keymux_core::{ConfigError, FallbackPolicy, PrefixStyle, DEFAULT_LOG_FILTER};
use keymux_resolver::{
    CancellationToken, ConcurrentResolver, Prefix, Registry, SequentialResolver, TracingObserver,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Startup settings shared by every resolver the embedding code builds.
///
/// Missing fields in a settings document take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `tracing` filter directive, e.g. `keymux_resolver=debug`
    pub log_filter: String,

    /// Behaviour when no candidate key produces a value
    pub fallback: FallbackPolicy,

    /// Separator used by [`Settings::prefix`]
    pub prefix_style: PrefixStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            fallback: FallbackPolicy::default(),
            prefix_style: PrefixStyle::default(),
        }
    }
}

impl Settings {
    /// Build a prefix for `label` in the configured style
    #[must_use]
    pub fn prefix(&self, label: impl Into<String>) -> Prefix {
        Prefix::with_style(label, self.prefix_style)
    }

    /// Build a sequential resolver carrying these settings
    pub fn sequential_resolver<V>(
        &self,
        registry: impl Into<Arc<Registry<V>>>,
    ) -> Result<SequentialResolver<V>, ConfigError>
    where
        V: From<String> + 'static,
    {
        let resolver = SequentialResolver::try_new(registry)?
            .with_fallback(self.fallback)
            .with_observer(Arc::new(TracingObserver));
        tracing::debug!(fallback = %self.fallback, "built sequential resolver");
        Ok(resolver)
    }

    /// Build a concurrent resolver bound to `context` carrying these settings
    pub fn concurrent_resolver<V>(
        &self,
        registry: impl Into<Arc<Registry<V>>>,
        context: CancellationToken,
    ) -> Result<ConcurrentResolver<V>, ConfigError>
    where
        V: From<String> + 'static,
    {
        let resolver = ConcurrentResolver::bind(registry, context)?
            .with_fallback(self.fallback)
            .with_observer(Arc::new(TracingObserver));
        tracing::debug!(fallback = %self.fallback, "built concurrent resolver");
        Ok(resolver)
    }
}
