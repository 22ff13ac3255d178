//! Containers holding buffered items between flush points.
//!
//! - [`Container`] - Append/keyed-insert collection contract
//! - [`Entries`] - Default insertion-ordered, key-preserving container
//! - [`Factory`] - Creates a fresh empty container on every (re)initialization
//!
//! `Vec<V>` is a keyless [`Container`]: values can only be appended.

use std::convert::Infallible;

mod entries;

pub use entries::Entries;

/// Creates an empty container.
///
/// Called once per buffer generation: whenever a processor or buffer needs a
/// fresh container after the previous one was handed to a handler.
pub type Factory<'a, C> = Box<dyn FnMut() -> C + 'a>;

/// A mutable collection supporting ordered appends and keyed inserts.
///
/// # Example
///
/// ```
/// use chunkbuf::{Container, Entries};
///
/// let mut c: Entries<&str, i32> = Entries::new();
/// c.push(1);
/// assert_eq!(c.insert("a", 2), None);
/// assert_eq!(c.insert("a", 3), Some(2));
/// assert_eq!(c.len(), 2);
/// assert_eq!(c.get(&"a"), Some(&3));
/// ```
pub trait Container<K, V> {
    /// Appends a keyless value.
    fn push(&mut self, value: V);

    /// Stores `value` under `key`.
    ///
    /// Returns the previous value if the key was already present, in which
    /// case the container does not grow.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value stored under `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns true if a value is stored under `key`.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of stored values.
    fn len(&self) -> usize;

    /// Returns true if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keyless container: values are appended in order.
///
/// The key type is [`Infallible`], so a keyed insert cannot be expressed.
/// Use [`Entries`] (e.g. `Entries<usize, V>`) for keyed or positional items.
impl<V> Container<Infallible, V> for Vec<V> {
    fn push(&mut self, value: V) {
        Vec::push(self, value);
    }

    fn insert(&mut self, key: Infallible, _value: V) -> Option<V> {
        match key {}
    }

    fn get(&self, key: &Infallible) -> Option<&V> {
        match *key {}
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}
