//! Item sources for chunk processing.

use crate::entry::Entry;

/// Boxed iterator over source entries.
pub(crate) type EntryIter<'a, K, V, E> = Box<dyn Iterator<Item = Result<Entry<K, V>, E>> + 'a>;

/// The items a [`ChunkProcessor`](crate::ChunkProcessor) pulls from.
///
/// A source is either an iterator that is ready to be pulled, or a supplier
/// that produces one. A supplier is invoked exactly once, when the first
/// item is requested; if nothing is ever requested it is never invoked.
///
/// # Example
///
/// ```
/// use chunkbuf::{Entry, Source};
/// use std::convert::Infallible;
///
/// let plain: Source<'_, &str, i32, Infallible> = Source::values(vec![1, 2, 3]);
/// let keyed: Source<'_, &str, i32, Infallible> = Source::entries([("a", 1), ("b", 2)]);
/// let lazy: Source<'_, &str, i32, Infallible> = Source::deferred(|| Source::values(0..10));
/// let fallible: Source<'_, &str, i32, String> =
///     Source::fallible(vec![Ok(Entry::new(1)), Err("broken".to_string())]);
/// ```
pub struct Source<'a, K, V, E> {
    kind: Kind<'a, K, V, E>,
}

enum Kind<'a, K, V, E> {
    Ready(EntryIter<'a, K, V, E>),
    Deferred(Box<dyn FnOnce() -> Source<'a, K, V, E> + 'a>),
}

impl<'a, K, V, E> Source<'a, K, V, E> {
    /// Creates a source of keyless values.
    pub fn values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: 'a,
    {
        Self::fallible(values.into_iter().map(|value| Ok(Entry::new(value))))
    }

    /// Creates a source of entries; keyed entries are inserted by key.
    pub fn entries<I>(entries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Entry<K, V>>,
        I::IntoIter: 'a,
    {
        Self::fallible(entries.into_iter().map(|entry| Ok(entry.into())))
    }

    /// Creates a source whose iteration may fail.
    ///
    /// The first error ends processing and is yielded to the consumer as is.
    pub fn fallible<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Result<Entry<K, V>, E>>,
        I::IntoIter: 'a,
    {
        Self {
            kind: Kind::Ready(Box::new(items.into_iter())),
        }
    }

    /// Creates a source produced on demand by `supplier`.
    pub fn deferred<F>(supplier: F) -> Self
    where
        F: FnOnce() -> Source<'a, K, V, E> + 'a,
    {
        Self {
            kind: Kind::Deferred(Box::new(supplier)),
        }
    }

    /// Returns true if this source has not been produced yet.
    pub fn is_deferred(&self) -> bool {
        matches!(self.kind, Kind::Deferred(_))
    }

    /// Runs suppliers until an iterator is available.
    pub(crate) fn resolve(self) -> EntryIter<'a, K, V, E> {
        let mut source = self;
        loop {
            match source.kind {
                Kind::Ready(iter) => return iter,
                Kind::Deferred(supplier) => {
                    tracing::trace!("resolving deferred source");
                    source = supplier();
                }
            }
        }
    }
}

impl<'a, K, V: 'a, E> From<Vec<V>> for Source<'a, K, V, E> {
    fn from(values: Vec<V>) -> Self {
        Self::values(values)
    }
}

impl<K, V, E> std::fmt::Debug for Source<'_, K, V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_deferred() { "deferred" } else { "ready" };
        f.debug_struct("Source").field("kind", &kind).finish()
    }
}
