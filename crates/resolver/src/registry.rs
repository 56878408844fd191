//! Ordered registry of prefix-scoped lookup functions
//!
//! Entries are kept in registration order. When several prefixes claim the
//! same candidate key, the earliest registered entry is consulted first, so
//! first-match-wins is deterministic.

use crate::lookup::LookupFunction;
use crate::prefix::Prefix;
use std::fmt;

/// One registered (prefix, function) pair
pub struct Entry<V> {
    prefix: Prefix,
    function: LookupFunction<V>,
}

impl<V> Entry<V> {
    #[must_use]
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    #[must_use]
    pub fn function(&self) -> &LookupFunction<V> {
        &self.function
    }
}

impl<V> Clone for Entry<V> {
    fn clone(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            function: self.function.clone(),
        }
    }
}

impl<V> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("prefix", &self.prefix.marker())
            .field("shape", &self.function.shape())
            .finish()
    }
}

/// The unit of configuration handed to a resolver.
///
/// Build it once, then share it (usually as `Arc<Registry<V>>`) across any
/// number of resolvers and concurrent calls; it is never mutated after that.
pub struct Registry<V> {
    entries: Vec<Entry<V>>,
}

impl<V> Registry<V> {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry, builder style
    #[must_use]
    pub fn with(mut self, prefix: Prefix, function: LookupFunction<V>) -> Self {
        self.register(prefix, function);
        self
    }

    /// Append an entry
    pub fn register(&mut self, prefix: Prefix, function: LookupFunction<V>) {
        self.entries.push(Entry { prefix, function });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in registration order
    pub fn entries(&self) -> impl Iterator<Item = &Entry<V>> {
        self.entries.iter()
    }

    /// Entries whose prefix claims `candidate`, in registration order
    pub fn matching<'a>(&'a self, candidate: &'a str) -> impl Iterator<Item = &'a Entry<V>> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.prefix.matches(candidate))
    }

    /// Labels of every registered prefix, in registration order
    #[must_use]
    pub fn prefix_labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.prefix.label().to_string())
            .collect()
    }
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for Registry<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<V> fmt::Debug for Registry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<V> FromIterator<(Prefix, LookupFunction<V>)> for Registry<V> {
    fn from_iter<I: IntoIterator<Item = (Prefix, LookupFunction<V>)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(prefix, function)| Entry { prefix, function })
                .collect(),
        }
    }
}

impl<V> Extend<(Prefix, LookupFunction<V>)> for Registry<V> {
    fn extend<I: IntoIterator<Item = (Prefix, LookupFunction<V>)>>(&mut self, iter: I) {
        self.entries.extend(
            iter.into_iter()
                .map(|(prefix, function)| Entry { prefix, function }),
        );
    }
}
