//! Error types and result extensions for keymux operations

mod builders;
mod extensions;
mod types;

pub use extensions::*;
pub use types::{ConfigError, Error, LookupError, ResolutionError, Result};

#[cfg(test)]
mod tests;
