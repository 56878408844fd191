use keymux_core::constants::{DEFAULT_LOG_FILTER, KEYMUX_LOG_VAR};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Initialize the tracing system from `KEYMUX_LOG`
///
/// Falls back to the `info` filter when the variable is unset or blank.
/// Fails if a global subscriber is already installed.
pub fn init() -> Result<(), InitError> {
    let directive = std::env::var(KEYMUX_LOG_VAR).ok();
    init_with_filter(directive.as_deref().unwrap_or(DEFAULT_LOG_FILTER))
}

/// Initialize the tracing system with an explicit filter directive,
/// typically `Settings::log_filter`
pub fn init_with_filter(directive: &str) -> Result<(), InitError> {
    let filter = build_filter(directive)?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(filter = %directive, "tracing initialized");
    Ok(())
}

/// Parse a filter directive, treating blank input as the default filter
pub fn build_filter(directive: &str) -> Result<EnvFilter, InitError> {
    let directive = directive.trim();
    let directive = if directive.is_empty() {
        DEFAULT_LOG_FILTER
    } else {
        directive
    };
    Ok(EnvFilter::try_new(directive)?)
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
