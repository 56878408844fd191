use crate::observe::{Hook, ResolveEvent};
use crate::registry::Registry;
use keymux_core::{FallbackPolicy, ResolutionError};
use std::sync::Arc;

type LiteralFn<V> = dyn Fn(&str) -> V + Send + Sync;

/// What to hand back once every candidate key has come up empty
pub(crate) struct Fallback<V>(Option<Arc<LiteralFn<V>>>);

impl<V> Fallback<V> {
    pub(crate) fn none() -> Self {
        Self(None)
    }

    pub(crate) fn from_policy(policy: FallbackPolicy) -> Self
    where
        V: From<String> + 'static,
    {
        match policy {
            FallbackPolicy::None => Self(None),
            FallbackPolicy::LiteralLastKey => {
                Self(Some(Arc::new(|key: &str| V::from(key.to_string()))))
            }
        }
    }

    pub(crate) fn finish<S: AsRef<str>>(
        &self,
        keys: &[S],
        registry: &Registry<V>,
        hook: &Hook,
    ) -> Result<V, ResolutionError> {
        if let (Some(literal), Some(last)) = (&self.0, keys.last()) {
            hook.emit(ResolveEvent::FellBack {
                key: last.as_ref(),
            });
            return Ok(literal(last.as_ref()));
        }
        hook.emit(ResolveEvent::NotFound {
            attempted: keys.len(),
        });
        Err(ResolutionError::not_found(keys, registry.prefix_labels()))
    }
}

impl<V> Clone for Fallback<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V> std::fmt::Debug for Fallback<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = if self.0.is_some() {
            FallbackPolicy::LiteralLastKey
        } else {
            FallbackPolicy::None
        };
        f.debug_tuple("Fallback").field(&policy).finish()
    }
}
