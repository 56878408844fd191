//! Fan-out resolution with positional priority
//!
//! Plain and fallible lookups run inline while the call walks the candidate
//! keys. Contextual lookups are spawned onto the tokio runtime, each bound to
//! a child of the resolver's cancellation token. Once everything is
//! dispatched, the completion cells are drained strictly in candidate-key
//! order: a later key that finishes first still waits for every earlier key
//! to come up empty.
//!
//! Each spawned task reports through its own `oneshot` channel. Sending never
//! waits for the receiver, so a task whose result is never read finishes
//! without blocking, even after the call has returned.

use crate::fallback::Fallback;
use crate::lookup::{LookupFunction, LookupResult};
use crate::observe::{Hook, ResolveEvent, ResolveObserver, Settled};
use crate::prefix::Prefix;
use crate::registry::Registry;
use crate::validate::{validate, ResolverKind};
use futures::future::BoxFuture;
use keymux_core::{ConfigError, FallbackPolicy, LookupError, ResolutionError};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

/// Resolver that accepts every function shape and runs contextual lookups
/// concurrently
#[derive(Debug)]
pub struct ConcurrentResolver<V> {
    registry: Arc<Registry<V>>,
    context: CancellationToken,
    fallback: Fallback<V>,
    hook: Hook,
}

/// Outcome of one lookup attempt, either already known or still running
enum Attempt<V> {
    Ready(LookupResult<V>),
    Pending(oneshot::Receiver<LookupResult<V>>),
}

/// Every attempt made for one candidate key, in registration order
struct CompletionCell<'a, V> {
    key: &'a str,
    attempts: Vec<(&'a Prefix, Attempt<V>)>,
}

impl<V> ConcurrentResolver<V> {
    /// Validate `registry` and build a resolver bound to `context`.
    ///
    /// A `None` context is rejected with `ConfigError::MissingContext`.
    pub fn try_new(
        registry: impl Into<Arc<Registry<V>>>,
        context: Option<CancellationToken>,
    ) -> Result<Self, ConfigError> {
        let registry = registry.into();
        let Some(context) = context else {
            // An empty registry is reported ahead of the missing context.
            if registry.is_empty() {
                return Err(ConfigError::EmptyRegistry);
            }
            return Err(ConfigError::missing_context(ResolverKind::Concurrent.name()));
        };
        let resolver = Self {
            registry,
            context,
            fallback: Fallback::none(),
            hook: Hook::default(),
        };
        resolver.validate()?;
        Ok(resolver)
    }

    /// Shorthand for [`ConcurrentResolver::try_new`] with a bound context
    pub fn bind(
        registry: impl Into<Arc<Registry<V>>>,
        context: CancellationToken,
    ) -> Result<Self, ConfigError> {
        Self::try_new(registry, Some(context))
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

    /// The bound context; cancelling it cancels every call in flight
    #[must_use]
    pub fn context(&self) -> &CancellationToken {
        &self.context
    }

    /// Re-run validation; safe to call any number of times
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(
            &self.registry,
            ResolverKind::Concurrent,
            true,
            self.hook.as_dyn(),
        )
    }
}

impl<V: Send + 'static> ConcurrentResolver<V> {
    /// Resolve the earliest candidate key that produces a value
    ///
    /// # Panics
    ///
    /// Contextual lookups are spawned with `tokio::spawn`, so polling this
    /// future outside a tokio runtime panics once a contextual entry matches.
    /// Calls served only by plain and fallible entries run anywhere.
    pub async fn resolve<S: AsRef<str>>(&self, keys: &[S]) -> Result<V, ResolutionError> {
        let token = self.context.child_token();
        // Cancels `token` on every return path below.
        let _guard = token.clone().drop_guard();

        let cells = self.dispatch(keys, &token);

        for CompletionCell { key, attempts } in cells {
            for (prefix, attempt) in attempts {
                let outcome = match attempt {
                    Attempt::Ready(outcome) => outcome,
                    Attempt::Pending(receiver) => receiver
                        .await
                        .map_err(|_| ResolutionError::task_aborted(key))?,
                };

                match outcome {
                    Err(source) => {
                        self.settled(key, prefix, Settled::Errored);
                        return Err(ResolutionError::lookup(key, source));
                    }
                    Ok(Some(value)) => {
                        self.settled(key, prefix, Settled::Found);
                        return Ok(value);
                    }
                    Ok(None) => self.settled(key, prefix, Settled::Missing),
                }
            }
        }

        self.fallback.finish(keys, &self.registry, &self.hook)
    }

    /// Run inline lookups and spawn contextual ones, one cell per key
    fn dispatch<'a, S: AsRef<str>>(
        &'a self,
        keys: &'a [S],
        token: &CancellationToken,
    ) -> Vec<CompletionCell<'a, V>> {
        let mut cells = Vec::with_capacity(keys.len());

        for key in keys {
            let key = key.as_ref();
            let mut attempts = Vec::new();

            for entry in self.registry.matching(key) {
                let prefix = entry.prefix();
                let bare = prefix.strip(key);
                let shape = entry.function().shape();

                let attempt = match entry.function() {
                    LookupFunction::Plain(f) => {
                        self.hook.emit(ResolveEvent::LookupStarted { key, prefix, shape });
                        Attempt::Ready(Ok(f(bare)))
                    }
                    LookupFunction::Fallible(f) => {
                        self.hook.emit(ResolveEvent::LookupStarted { key, prefix, shape });
                        Attempt::Ready(f(bare))
                    }
                    LookupFunction::Contextual(f) => {
                        self.hook.emit(ResolveEvent::LookupDispatched { key, prefix, shape });
                        let lookup = f(token.clone(), bare.to_string());
                        Attempt::Pending(spawn_lookup(Box::pin(async move {
                            Ok::<_, LookupError>(lookup.await)
                        })))
                    }
                    LookupFunction::ContextualFallible(f) => {
                        self.hook.emit(ResolveEvent::LookupDispatched { key, prefix, shape });
                        Attempt::Pending(spawn_lookup(f(token.clone(), bare.to_string())))
                    }
                };
                attempts.push((prefix, attempt));
            }

            cells.push(CompletionCell { key, attempts });
        }

        cells
    }

    fn settled(&self, key: &str, prefix: &Prefix, outcome: Settled) {
        self.hook.emit(ResolveEvent::LookupSettled {
            key,
            prefix,
            outcome,
        });
    }
}

/// Run `lookup` as its own task, reporting through a single-slot channel
fn spawn_lookup<V: Send + 'static>(
    lookup: BoxFuture<'static, LookupResult<V>>,
) -> oneshot::Receiver<LookupResult<V>> {
    let (sender, receiver) = oneshot::channel();
    tokio::spawn(async move {
        // The receiver is gone once the call has chosen an answer.
        let _ = sender.send(lookup.await);
    });
    receiver
}

impl<V: From<String> + 'static> ConcurrentResolver<V> {
    /// Choose what happens when no candidate key produces a value
    #[must_use]
    pub fn with_fallback(mut self, policy: FallbackPolicy) -> Self {
        self.fallback = Fallback::from_policy(policy);
        self
    }
}

impl<V> Clone for ConcurrentResolver<V> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            context: self.context.clone(),
            fallback: self.fallback.clone(),
            hook: self.hook.clone(),
        }
    }
}
