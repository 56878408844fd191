//! Prefix-routed value resolution for keymux
//!
//! A [`Registry`] maps namespace prefixes (`env/`, `secret.`, ...) to lookup
//! functions. A resolver takes the ordered candidate keys written at a
//! template call site, routes each to the functions whose prefix claims it,
//! and returns the first value found.
//!
//! ```text
//! {{ param "env/DB_URL" "secret/db-url" "default/postgres://localhost" }}
//! ```
//!
//! Two resolvers share that contract:
//!
//! - [`SequentialResolver`] runs everything on the calling thread and only
//!   accepts plain and fallible functions.
//! - [`ConcurrentResolver`] additionally accepts contextual functions, runs
//!   them as concurrent tasks, and still honours candidate-key order.
//!
//! Both are validated when built; a registry that cannot be served by the
//! chosen resolver never reaches `resolve`.

pub mod builtin;
pub mod concurrent;
mod fallback;
pub mod lookup;
pub mod observe;
pub mod prefix;
pub mod registry;
pub mod resolve;
pub mod sequential;
pub mod validate;

pub use concurrent::ConcurrentResolver;
pub use lookup::{LookupFunction, LookupResult, Shape};
pub use observe::{ResolveEvent, ResolveObserver, Settled, TracingObserver};
pub use prefix::Prefix;
pub use registry::{Entry, Registry};
pub use resolve::KeyResolver;
pub use sequential::SequentialResolver;
pub use validate::{validate, ResolverKind};

pub use keymux_core::{ConfigError, FallbackPolicy, LookupError, PrefixStyle, ResolutionError};
pub use tokio_util::sync::CancellationToken;
