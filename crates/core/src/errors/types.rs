//! Core error type definitions

/// Error produced by a lookup function itself; passed through to the caller
pub type LookupError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for keymux operations
pub type Result<T> = std::result::Result<T, Error>;

/// Registry and resolver mismatches, detected once before any resolution runs
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The registry holds no lookup function at all
    #[error("no lookup function registered")]
    EmptyRegistry,

    /// A context-capable resolver was built without a cancellation context
    #[error("{resolver} requires a bound cancellation context")]
    MissingContext { resolver: &'static str },

    /// A lookup function whose shape the resolver cannot run
    #[error(
        "invalid function of {resolver}: prefix '{prefix}' holds a {shape} function{}",
        shape_hint(.shape)
    )]
    IncompatibleFunctionShape {
        resolver: &'static str,
        prefix: String,
        shape: &'static str,
    },
}

fn shape_hint(shape: &str) -> &'static str {
    if shape.starts_with("contextual") {
        " (consider binding a cancellation context and using the concurrent resolver)"
    } else {
        ""
    }
}

/// Failures of a single resolution call
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// No candidate key produced a value
    #[error("match failed for keys {attempted_keys:?} with prefixes {registered_prefixes:?}")]
    NotFound {
        attempted_keys: Vec<String>,
        registered_prefixes: Vec<String>,
    },

    /// A lookup function reported an error; resolution stops here
    #[error("lookup for '{key}' failed: {source}")]
    Lookup {
        key: String,
        #[source]
        source: LookupError,
    },

    /// A function shape reached a resolver that cannot run it
    #[error("prefix '{prefix}' holds a {shape} function this resolver cannot run; validate the registry first")]
    InvalidShape { prefix: String, shape: &'static str },

    /// A dispatched lookup task ended without reporting an outcome
    #[error("lookup task for '{key}' ended without reporting a result")]
    TaskAborted { key: String },
}

/// Umbrella error for keymux operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Registry validation errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Resolution errors
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Prefix notation that cannot be parsed
    #[error("invalid prefix '{value}': {message}")]
    InvalidPrefix { value: String, message: String },

    /// Settings values that cannot be applied
    #[error("invalid setting '{key}': {message}")]
    Settings { key: String, message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// An error annotated with the operation that produced it
    #[error("{message}: {source}")]
    Context {
        message: String,
        #[source]
        source: Box<Error>,
    },
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}
