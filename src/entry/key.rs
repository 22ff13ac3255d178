//! Output keys.

use std::fmt;

/// The key of an item yielded by [`Consume`](crate::Consume).
///
/// `Index` is a position; `Name` is a key a chunk handler emitted
/// explicitly. Collecting into a map lets later items overwrite earlier
/// ones under the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key<K> {
    /// Positional key.
    Index(usize),

    /// Key emitted by the handler.
    Name(K),
}

impl<K> Key<K> {
    /// Returns the position, if this is a positional key.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    /// Returns the handler-emitted key, if any.
    pub fn as_name(&self) -> Option<&K> {
        match self {
            Key::Index(_) => None,
            Key::Name(k) => Some(k),
        }
    }
}

impl<K: fmt::Display> fmt::Display for Key<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(k) => write!(f, "{}", k),
        }
    }
}
