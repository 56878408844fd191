//! The four call shapes a lookup function may take
//!
//! Every lookup receives the bare key (prefix already stripped) and signals
//! success by returning `Some`. A `Some` holding an empty value is still a
//! final answer; only `None` means "not found here".
//!
//! | shape                 | signature                                          |
//! |-----------------------|----------------------------------------------------|
//! | `Plain`               | `&str -> Option<V>`                                |
//! | `Fallible`            | `&str -> Result<Option<V>, LookupError>`           |
//! | `Contextual`          | `(CancellationToken, String) -> Future<Option<V>>` |
//! | `ContextualFallible`  | `(CancellationToken, String) -> Future<Result<..>>`|
//!
//! The contextual shapes only run under the concurrent resolver, which hands
//! them a per-call token that is cancelled once an answer has been chosen.

use futures::future::{BoxFuture, FutureExt};
use keymux_core::LookupError;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Outcome of one fallible lookup
pub type LookupResult<V> = Result<Option<V>, LookupError>;

type PlainFn<V> = dyn Fn(&str) -> Option<V> + Send + Sync;
type FallibleFn<V> = dyn Fn(&str) -> LookupResult<V> + Send + Sync;
type ContextualFn<V> = dyn Fn(CancellationToken, String) -> BoxFuture<'static, Option<V>> + Send + Sync;
type ContextualFallibleFn<V> =
    dyn Fn(CancellationToken, String) -> BoxFuture<'static, LookupResult<V>> + Send + Sync;

/// A lookup function in one of the four supported shapes
pub enum LookupFunction<V> {
    Plain(Arc<PlainFn<V>>),
    Fallible(Arc<FallibleFn<V>>),
    Contextual(Arc<ContextualFn<V>>),
    ContextualFallible(Arc<ContextualFallibleFn<V>>),
}

/// Discriminant of a [`LookupFunction`], used in diagnostics and validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Plain,
    Fallible,
    Contextual,
    ContextualFallible,
}

impl Shape {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Plain => "plain",
            Shape::Fallible => "fallible",
            Shape::Contextual => "contextual",
            Shape::ContextualFallible => "contextual_fallible",
        }
    }

    /// Whether functions of this shape take a cancellation context
    #[must_use]
    pub fn requires_context(&self) -> bool {
        matches!(self, Shape::Contextual | Shape::ContextualFallible)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<V: 'static> LookupFunction<V> {
    /// Wrap a function that either finds a value or does not
    pub fn plain<F>(f: F) -> Self
    where
        F: Fn(&str) -> Option<V> + Send + Sync + 'static,
    {
        Self::Plain(Arc::new(f))
    }

    /// Wrap a function that may also fail
    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Option<V>, E> + Send + Sync + 'static,
        E: Into<LookupError>,
    {
        Self::Fallible(Arc::new(move |key: &str| -> LookupResult<V> {
            f(key).map_err(Into::into)
        }))
    }

    /// Wrap an async function that receives the per-call cancellation token
    pub fn contextual<F, Fut>(f: F) -> Self
    where
        F: Fn(CancellationToken, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<V>> + Send + 'static,
    {
        Self::Contextual(Arc::new(move |token: CancellationToken, key: String| {
            f(token, key).boxed()
        }))
    }

    /// Wrap an async function that receives the per-call cancellation token
    /// and may fail
    pub fn contextual_fallible<F, Fut, E>(f: F) -> Self
    where
        F: Fn(CancellationToken, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<V>, E>> + Send + 'static,
        E: Into<LookupError> + 'static,
    {
        Self::ContextualFallible(Arc::new(move |token: CancellationToken, key: String| {
            f(token, key)
                .map(|result| -> LookupResult<V> { result.map_err(Into::into) })
                .boxed()
        }))
    }
}

impl<V> LookupFunction<V> {
    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            LookupFunction::Plain(_) => Shape::Plain,
            LookupFunction::Fallible(_) => Shape::Fallible,
            LookupFunction::Contextual(_) => Shape::Contextual,
            LookupFunction::ContextualFallible(_) => Shape::ContextualFallible,
        }
    }
}

impl<V> Clone for LookupFunction<V> {
    fn clone(&self) -> Self {
        match self {
            LookupFunction::Plain(f) => LookupFunction::Plain(Arc::clone(f)),
            LookupFunction::Fallible(f) => LookupFunction::Fallible(Arc::clone(f)),
            LookupFunction::Contextual(f) => LookupFunction::Contextual(Arc::clone(f)),
            LookupFunction::ContextualFallible(f) => {
                LookupFunction::ContextualFallible(Arc::clone(f))
            }
        }
    }
}

impl<V> fmt::Debug for LookupFunction<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LookupFunction").field(&self.shape()).finish()
    }
}
