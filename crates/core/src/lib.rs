//! Core domain types, errors, and constants for `keymux`.
//!
//! This crate holds the pieces every other keymux crate agrees on: the error
//! taxonomy surfaced to callers, the policy enums shared by the resolver and
//! the settings loader, and the environment variable names read at startup.
//!
//! ## Key Components
//!
//! - **`errors`**: `ConfigError` for registry/resolver mismatches caught at
//!   validation time, `ResolutionError` for per-call failures, and the
//!   umbrella `Error` / `Result` pair.
//! - **`types`**: `FallbackPolicy` and `PrefixStyle`.
//! - **`constants`**: environment variable names and separator characters.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{ConfigError, Error, LookupError, ResolutionError, Result, ResultExt},
    types::*,
};
