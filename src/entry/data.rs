//! The Entry type - a value with an optional key.

use std::fmt;

/// A value paired with an optional key.
///
/// Keyless entries are appended to a container; keyed entries are inserted
/// under their key, replacing any value already stored there.
///
/// # Example
///
/// ```
/// use chunkbuf::Entry;
///
/// let plain: Entry<&str, i32> = Entry::new(1);
/// assert!(plain.key.is_none());
///
/// let keyed = Entry::keyed("id", 7);
/// assert_eq!(keyed.key, Some("id"));
///
/// let from_pair: Entry<&str, i32> = ("id", 7).into();
/// assert_eq!(from_pair, keyed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    /// The key to insert under, if any.
    pub key: Option<K>,

    /// The stored value.
    pub value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates a keyless entry.
    pub const fn new(value: V) -> Self {
        Self { key: None, value }
    }

    /// Creates an entry stored under `key`.
    pub const fn keyed(key: K, value: V) -> Self {
        Self {
            key: Some(key),
            value,
        }
    }

    /// Returns the key, if set.
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Returns a reference to the value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Drops the key, keeping the value.
    pub fn unkeyed(self) -> Self {
        Self::new(self.value)
    }

    /// Maps the value, keeping the key.
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Entry<K, U> {
        Entry {
            key: self.key,
            value: f(self.value),
        }
    }

    /// Splits the entry into (key, value).
    pub fn into_parts(self) -> (Option<K>, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::keyed(key, value)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{} => {}", key, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}
