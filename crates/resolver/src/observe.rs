//! Diagnostic hook for resolution
//!
//! The resolvers never log on their own. Callers that want visibility attach
//! a [`ResolveObserver`]; [`TracingObserver`] forwards every event to
//! `tracing` at debug level.

use crate::lookup::Shape;
use crate::prefix::Prefix;
use crate::validate::ResolverKind;

/// How a single lookup attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Found,
    Missing,
    Errored,
}

/// Something worth reporting during validation or resolution
#[derive(Debug, Clone, Copy)]
pub enum ResolveEvent<'a> {
    /// A registry entry passed validation
    EntryValidated {
        resolver: ResolverKind,
        prefix: &'a Prefix,
        shape: Shape,
    },
    /// A plain or fallible lookup is about to run on the calling task
    LookupStarted {
        key: &'a str,
        prefix: &'a Prefix,
        shape: Shape,
    },
    /// A contextual lookup was spawned as its own task
    LookupDispatched {
        key: &'a str,
        prefix: &'a Prefix,
        shape: Shape,
    },
    /// The outcome of one lookup attempt was consulted
    LookupSettled {
        key: &'a str,
        prefix: &'a Prefix,
        outcome: Settled,
    },
    /// No candidate key produced a value and the last key is returned verbatim
    FellBack { key: &'a str },
    /// No candidate key produced a value
    NotFound { attempted: usize },
}

/// Receives [`ResolveEvent`]s from validation and resolution
pub trait ResolveObserver: Send + Sync {
    fn on_event(&self, event: &ResolveEvent<'_>);
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ResolveObserver for TracingObserver {
    fn on_event(&self, event: &ResolveEvent<'_>) {
        match *event {
            ResolveEvent::EntryValidated {
                resolver,
                prefix,
                shape,
            } => {
                tracing::debug!(
                    resolver = %resolver,
                    prefix = %prefix,
                    shape = %shape,
                    "valid lookup function"
                );
            }
            ResolveEvent::LookupStarted { key, prefix, shape } => {
                tracing::debug!(key = %key, prefix = %prefix, shape = %shape, "executing lookup");
            }
            ResolveEvent::LookupDispatched { key, prefix, shape } => {
                tracing::debug!(key = %key, prefix = %prefix, shape = %shape, "dispatched lookup task");
            }
            ResolveEvent::LookupSettled {
                key,
                prefix,
                outcome,
            } => {
                tracing::debug!(key = %key, prefix = %prefix, outcome = ?outcome, "lookup settled");
            }
            ResolveEvent::FellBack { key } => {
                tracing::debug!(key = %key, "no match, using last key as literal");
            }
            ResolveEvent::NotFound { attempted } => {
                tracing::debug!(attempted = attempted, "no candidate key matched");
            }
        }
    }
}

/// Optional observer slot shared by both resolvers
#[derive(Clone, Default)]
pub(crate) struct Hook(Option<std::sync::Arc<dyn ResolveObserver>>);

impl Hook {
    pub(crate) fn new(observer: std::sync::Arc<dyn ResolveObserver>) -> Self {
        Self(Some(observer))
    }

    pub(crate) fn emit(&self, event: ResolveEvent<'_>) {
        if let Some(observer) = &self.0 {
            observer.on_event(&event);
        }
    }

    pub(crate) fn as_dyn(&self) -> Option<&dyn ResolveObserver> {
        self.0.as_deref()
    }
}

impl std::fmt::Debug for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.0.is_some() { "Some(..)" } else { "None" })
    }
}
