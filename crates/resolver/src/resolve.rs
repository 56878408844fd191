//! Object-safe resolver interface for embedding code
//!
//! A template engine registers one callable per function name and does not
//! care which resolver sits behind it. `KeyResolver` lets it hold either
//! variant as `Arc<dyn KeyResolver<V>>`.

use crate::concurrent::ConcurrentResolver;
use crate::sequential::SequentialResolver;
use async_trait::async_trait;
use keymux_core::ResolutionError;

/// Anything that turns an ordered list of candidate keys into one value
#[async_trait]
pub trait KeyResolver<V>: Send + Sync {
    /// Resolve the first candidate key that produces a value
    async fn resolve_keys(&self, keys: &[String]) -> Result<V, ResolutionError>;
}

#[async_trait]
impl<V: Send + 'static> KeyResolver<V> for SequentialResolver<V> {
    async fn resolve_keys(&self, keys: &[String]) -> Result<V, ResolutionError> {
        self.resolve(keys)
    }
}

#[async_trait]
impl<V: Send + 'static> KeyResolver<V> for ConcurrentResolver<V> {
    async fn resolve_keys(&self, keys: &[String]) -> Result<V, ResolutionError> {
        self.resolve(keys).await
    }
}
