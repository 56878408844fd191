//! Settings for keymux resolvers
//!
//! Settings are resolved once at startup (defaults, then an optional JSON
//! document, then `KEYMUX_*` environment overrides) and are immutable
//! afterwards.

pub mod loader;
pub mod settings;

pub use loader::SettingsLoader;
pub use settings::Settings;
