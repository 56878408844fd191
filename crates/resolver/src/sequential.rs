//! First-match resolution on the calling thread
//!
//! Candidate keys are tried in the order given; within a key, matching
//! entries are tried in registration order. The first `Some` wins and the
//! first lookup error aborts the whole call.

use crate::fallback::Fallback;
use crate::lookup::LookupFunction;
use crate::observe::{Hook, ResolveEvent, ResolveObserver, Settled};
use crate::registry::Registry;
use crate::validate::{validate, ResolverKind};
use keymux_core::{ConfigError, FallbackPolicy, ResolutionError};
use std::sync::Arc;

/// Resolver for registries made only of plain and fallible functions
#[derive(Debug)]
pub struct SequentialResolver<V> {
    registry: Arc<Registry<V>>,
    fallback: Fallback<V>,
    hook: Hook,
}

impl<V> SequentialResolver<V> {
    /// Validate `registry` and build a resolver over it
    pub fn try_new(registry: impl Into<Arc<Registry<V>>>) -> Result<Self, ConfigError> {
        let resolver = Self {
            registry: registry.into(),
            fallback: Fallback::none(),
            hook: Hook::default(),
        };
        resolver.validate()?;
        Ok(resolver)
    }

    /// Attach a diagnostic observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ResolveObserver>) -> Self {
        self.hook = Hook::new(observer);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<Registry<V>> {
        &self.registry
    }

    /// Re-run validation; safe to call any number of times
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(
            &self.registry,
            ResolverKind::Sequential,
            false,
            self.hook.as_dyn(),
        )
    }

    /// Resolve the first candidate key that produces a value
    pub fn resolve<S: AsRef<str>>(&self, keys: &[S]) -> Result<V, ResolutionError> {
        for key in keys {
            let key = key.as_ref();
            for entry in self.registry.matching(key) {
                let prefix = entry.prefix();
                let bare = prefix.strip(key);
                let shape = entry.function().shape();

                let outcome = match entry.function() {
                    LookupFunction::Plain(f) => {
                        self.hook.emit(ResolveEvent::LookupStarted { key, prefix, shape });
                        Ok(f(bare))
                    }
                    LookupFunction::Fallible(f) => {
                        self.hook.emit(ResolveEvent::LookupStarted { key, prefix, shape });
                        f(bare)
                    }
                    LookupFunction::Contextual(_) | LookupFunction::ContextualFallible(_) => {
                        return Err(ResolutionError::invalid_shape(
                            prefix.label(),
                            shape.as_str(),
                        ));
                    }
                };

                match outcome {
                    Err(source) => {
                        self.hook.emit(ResolveEvent::LookupSettled {
                            key,
                            prefix,
                            outcome: Settled::Errored,
                        });
                        return Err(ResolutionError::lookup(key, source));
                    }
                    Ok(Some(value)) => {
                        self.hook.emit(ResolveEvent::LookupSettled {
                            key,
                            prefix,
                            outcome: Settled::Found,
                        });
                        return Ok(value);
                    }
                    Ok(None) => {
                        self.hook.emit(ResolveEvent::LookupSettled {
                            key,
                            prefix,
                            outcome: Settled::Missing,
                        });
                    }
                }
            }
        }

        self.fallback.finish(keys, &self.registry, &self.hook)
    }
}

impl<V: From<String> + 'static> SequentialResolver<V> {
    /// Choose what happens when no candidate key produces a value
    #[must_use]
    pub fn with_fallback(mut self, policy: FallbackPolicy) -> Self {
        self.fallback = Fallback::from_policy(policy);
        self
    }
}

impl<V> Clone for SequentialResolver<V> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            fallback: self.fallback.clone(),
            hook: self.hook.clone(),
        }
    }
}

#[cfg(test)]
mod tests;
