//! Insertion-ordered, key-preserving container.

use std::collections::HashMap;
use std::hash::Hash;

use super::Container;
use crate::entry::Entry;

/// The default container: an ordered list of entries with keyed lookup.
///
/// Keyless values are appended; keyed values are inserted once and replaced
/// in place afterwards, so iteration order is the order in which each slot
/// was first filled.
///
/// # Example
///
/// ```
/// use chunkbuf::{Container, Entries, Entry};
///
/// let mut entries: Entries<&str, i32> = Entries::new();
/// entries.insert("a", 1);
/// entries.push(2);
/// entries.insert("a", 3);
///
/// let flat: Vec<_> = entries.into_iter().collect();
/// assert_eq!(flat, [Entry::keyed("a", 3), Entry::new(2)]);
/// ```
#[derive(Debug, Clone)]
pub struct Entries<K, V> {
    slots: Vec<Entry<K, V>>,
    index: HashMap<K, usize>,
}

impl<K, V> Entries<K, V> {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Creates an empty container with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::new(),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<K, V>> {
        self.slots.iter()
    }

    /// Iterates over the values in order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.slots.iter().map(|entry| &entry.value)
    }

    /// Consumes the container, yielding the values in order.
    pub fn into_values(self) -> impl Iterator<Item = V> {
        self.slots.into_iter().map(|entry| entry.value)
    }
}

impl<K: Eq + Hash, V> Entries<K, V> {
    /// Returns the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&i| &self.slots[i].value)
    }
}

impl<K, V> Default for Entries<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone, V> Container<K, V> for Entries<K, V> {
    fn push(&mut self, value: V) {
        self.slots.push(Entry::new(value));
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.slots[i].value, value));
        }

        self.index.insert(key.clone(), self.slots.len());
        self.slots.push(Entry::keyed(key, value));
        None
    }

    fn get(&self, key: &K) -> Option<&V> {
        Entries::get(self, key)
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

// Two containers are equal when they hold the same entries in the same order;
// the lookup index is derived state.
impl<K: PartialEq, V: PartialEq> PartialEq for Entries<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl<K: Eq, V: Eq> Eq for Entries<K, V> {}

impl<K, V> IntoIterator for Entries<K, V> {
    type Item = Entry<K, V>;
    type IntoIter = std::vec::IntoIter<Entry<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Entries<K, V> {
    type Item = &'a Entry<K, V>;
    type IntoIter = std::slice::Iter<'a, Entry<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl<K: Eq + Hash + Clone, V> Extend<Entry<K, V>> for Entries<K, V> {
    fn extend<I: IntoIterator<Item = Entry<K, V>>>(&mut self, iter: I) {
        for entry in iter {
            match entry.key {
                Some(key) => {
                    self.insert(key, entry.value);
                }
                None => self.push(entry.value),
            }
        }
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<Entry<K, V>> for Entries<K, V> {
    fn from_iter<I: IntoIterator<Item = Entry<K, V>>>(iter: I) -> Self {
        let mut entries = Self::new();
        entries.extend(iter);
        entries
    }
}
