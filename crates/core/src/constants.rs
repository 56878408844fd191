/// Constants used throughout the keymux codebase
// Separators for the built-in prefix styles
pub const DOT_SEPARATOR: char = '.';
pub const SLASH_SEPARATOR: char = '/';

// Environment variable names
pub const KEYMUX_LOG_VAR: &str = "KEYMUX_LOG";
pub const KEYMUX_FALLBACK_VAR: &str = "KEYMUX_FALLBACK";
pub const KEYMUX_PREFIX_STYLE_VAR: &str = "KEYMUX_PREFIX_STYLE";

// Log filter used when KEYMUX_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
