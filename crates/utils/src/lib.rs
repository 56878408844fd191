//! Shared utilities for keymux
//!
//! Currently this is the process-wide `tracing` subscriber setup that
//! embedding binaries call once at startup.

pub mod tracing;

pub use self::tracing::{build_filter, init, init_with_filter, InitError};
