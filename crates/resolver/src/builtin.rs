//! Ready-made lookup functions for the common namespaces

use crate::lookup::LookupFunction;
use std::collections::HashMap;
use std::env::{self, VarError};

/// Read the bare key from the process environment.
///
/// An unset variable is "not found"; a variable holding invalid unicode is
/// an error, since falling through to a later key would hide it.
#[must_use]
pub fn env_var() -> LookupFunction<String> {
    LookupFunction::fallible(|key| match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err @ VarError::NotUnicode(_)) => Err(err),
    })
}

/// The bare key is the value; useful as a last-resort default namespace
#[must_use]
pub fn key_as_value() -> LookupFunction<String> {
    LookupFunction::plain(|key| Some(key.to_string()))
}

/// Look the bare key up in a fixed table
#[must_use]
pub fn table<V>(entries: HashMap<String, V>) -> LookupFunction<V>
where
    V: Clone + Send + Sync + 'static,
{
    LookupFunction::plain(move |key| entries.get(key).cloned())
}
