//! Registry validation
//!
//! Runs once when a resolver is built and may be re-run at any time. It only
//! inspects shapes; no lookup function is ever invoked.

use crate::observe::{ResolveEvent, ResolveObserver};
use crate::registry::Registry;
use keymux_core::ConfigError;
use std::fmt;

/// Which resolver a registry is being validated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverKind {
    Sequential,
    Concurrent,
}

impl ResolverKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ResolverKind::Sequential => "sequential resolver",
            ResolverKind::Concurrent => "concurrent resolver",
        }
    }

    /// Whether this resolver has a cancellation context to offer
    #[must_use]
    pub fn supports_context(&self) -> bool {
        matches!(self, ResolverKind::Concurrent)
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that `registry` can be served by a resolver of `kind`.
///
/// Checks run in order: empty registry, missing context (concurrent only),
/// then each entry's shape in registration order.
pub fn validate<V>(
    registry: &Registry<V>,
    kind: ResolverKind,
    context_bound: bool,
    observer: Option<&dyn ResolveObserver>,
) -> Result<(), ConfigError> {
    if registry.is_empty() {
        return Err(ConfigError::EmptyRegistry);
    }
    if kind.supports_context() && !context_bound {
        return Err(ConfigError::missing_context(kind.name()));
    }

    for entry in registry.entries() {
        let shape = entry.function().shape();
        if shape.requires_context() && !kind.supports_context() {
            return Err(ConfigError::incompatible_shape(
                kind.name(),
                entry.prefix().label(),
                shape.as_str(),
            ));
        }
        if let Some(observer) = observer {
            observer.on_event(&ResolveEvent::EntryValidated {
                resolver: kind,
                prefix: entry.prefix(),
                shape,
            });
        }
    }

    Ok(())
}
