//! The FlushingBuffer type.

use std::marker::PhantomData;

use crate::container::{Container, Factory};
use crate::entry::Entry;
use crate::path::{Path, PathValue};

type FlushHandler<'a, C, R, E> = Box<dyn FnMut(&mut C) -> Result<R, E> + 'a>;

/// A buffer that flushes itself once it holds `size` items.
///
/// Items are added one at a time, optionally under a key. Every insertion of
/// a keyless item or a new key counts towards the threshold; overwriting an
/// existing key does not. When the count reaches the threshold, the flush
/// handler receives the container and the buffer starts over with a fresh
/// container and a zero count.
///
/// A size of `0` disables automatic flushing; [`flush`](Self::flush) and
/// [`force_flush`](Self::force_flush) are always available.
///
/// The handler gets `&mut C`. Container and count are only reset once the
/// handler returns `Ok`, so a failed flush keeps every buffered item.
///
/// # Example
///
/// ```
/// use chunkbuf::FlushingBuffer;
/// use std::cell::RefCell;
/// use std::convert::Infallible;
///
/// let flushed = RefCell::new(Vec::new());
/// let mut buffer = FlushingBuffer::new(2, |items: &mut Vec<&str>| {
///     flushed.borrow_mut().push(std::mem::take(items));
///     Ok::<_, Infallible>(())
/// });
///
/// for item in ["A", "B", "C", "D", "E"] {
///     buffer.add(item, None)?;
/// }
/// assert_eq!(*flushed.borrow(), [vec!["A", "B"], vec!["C", "D"]]);
/// assert_eq!(buffer.count(), 1);
///
/// buffer.flush()?;
/// assert_eq!(flushed.borrow().last(), Some(&vec!["E"]));
/// # Ok::<(), Infallible>(())
/// ```
pub struct FlushingBuffer<'a, K, V, C, R, E> {
    size: usize,
    handler: FlushHandler<'a, C, R, E>,
    factory: Factory<'a, C>,
    data: C,
    count: usize,
    _entry: PhantomData<fn(K, V)>,
}

impl<'a, K, V, C, R, E> FlushingBuffer<'a, K, V, C, R, E>
where
    C: Container<K, V>,
{
    /// Creates a buffer using `C::default()` for every new container.
    ///
    /// # Arguments
    ///
    /// * `size` - Items that trigger a flush; `0` disables automatic flushing
    /// * `handler` - Receives the buffered items; its result is returned by
    ///   manual flushes
    pub fn new<F>(size: usize, handler: F) -> Self
    where
        F: FnMut(&mut C) -> Result<R, E> + 'a,
        C: Default + 'a,
    {
        Self::from_factory(size, handler, C::default)
    }

    /// Creates a buffer that gets every container from `factory`.
    ///
    /// Unlike [`new`](Self::new), `C` does not need to implement `Default`.
    pub fn from_factory<F, G>(size: usize, handler: F, factory: G) -> Self
    where
        F: FnMut(&mut C) -> Result<R, E> + 'a,
        G: FnMut() -> C + 'a,
    {
        let mut factory: Factory<'a, C> = Box::new(factory);
        Self {
            size,
            handler: Box::new(handler),
            data: factory(),
            factory,
            count: 0,
            _entry: PhantomData,
        }
    }

    /// Replaces the container factory and starts over with one of its
    /// containers.
    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: FnMut() -> C + 'a,
    {
        self.factory = Box::new(factory);
        self.reset();
        self
    }

    /// Adds an item, optionally under `key`.
    ///
    /// Flushes before returning if the threshold is reached.
    ///
    /// # Errors
    ///
    /// Returns the handler's error if an automatic flush fails. The item is
    /// stored either way.
    pub fn add(&mut self, value: V, key: Option<K>) -> Result<&mut Self, E> {
        let grew = match key {
            Some(key) => self.data.insert(key, value).is_none(),
            None => {
                self.data.push(value);
                true
            }
        };
        if grew {
            self.count += 1;
        }

        if self.size > 0 && self.count >= self.size {
            tracing::debug!(count = self.count, size = self.size, "buffer full, flushing");
            self.force_flush()?;
        }

        Ok(self)
    }

    /// Appends every value in order, each one possibly triggering a flush.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkbuf::FlushingBuffer;
    /// use std::convert::Infallible;
    ///
    /// let mut buffer = FlushingBuffer::new(3, |_: &mut Vec<char>| Ok::<_, Infallible>(()));
    /// buffer.add_values(['A', 'B'])?.add_values(['C', 'D'])?;
    /// assert_eq!(buffer.count(), 1);
    /// # Ok::<(), Infallible>(())
    /// ```
    pub fn add_values<I>(&mut self, values: I) -> Result<&mut Self, E>
    where
        I: IntoIterator<Item = V>,
    {
        for value in values {
            self.add(value, None)?;
        }
        Ok(self)
    }

    /// Adds every item in order, each one possibly triggering a flush.
    ///
    /// With `maintain_keys`, keyed entries are stored under their key;
    /// otherwise all items are appended.
    pub fn add_multiple<I>(&mut self, items: I, maintain_keys: bool) -> Result<&mut Self, E>
    where
        I: IntoIterator,
        I::Item: Into<Entry<K, V>>,
    {
        for item in items {
            let entry = item.into();
            let key = if maintain_keys { entry.key } else { None };
            self.add(entry.value, key)?;
        }
        Ok(self)
    }

    /// Stores `value` under each key in order.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkbuf::{Entries, Entry, FlushingBuffer};
    /// use std::convert::Infallible;
    ///
    /// let mut buffer = FlushingBuffer::new(0, |_: &mut Entries<&str, i32>| Ok::<_, Infallible>(()));
    /// buffer.fill_keys(["a", "b"], 1)?.fill_keys(["b", "c"], 2)?;
    ///
    /// assert_eq!(buffer.count(), 3);
    /// let expected: Entries<&str, i32> =
    ///     [("a", 1), ("b", 2), ("c", 2)].into_iter().map(Entry::from).collect();
    /// assert_eq!(buffer.contents(), &expected);
    /// # Ok::<(), Infallible>(())
    /// ```
    pub fn fill_keys<I>(&mut self, keys: I, value: V) -> Result<&mut Self, E>
    where
        I: IntoIterator<Item = K>,
        V: Clone,
    {
        for key in keys {
            self.add(value.clone(), Some(key))?;
        }
        Ok(self)
    }

    /// Assigns `value` at a nested path.
    ///
    /// The path's root segment is the buffer key. The value currently stored
    /// there (or an empty structure) is walked along the remaining segments,
    /// and the result is stored back under the root key. Reusing a root key
    /// therefore does not count as a new item.
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(feature = "json")]
    /// # {
    /// use chunkbuf::{Entries, FlushingBuffer};
    /// use serde_json::{json, Value};
    /// use std::convert::Infallible;
    ///
    /// let mut buffer = FlushingBuffer::new(0, |items: &mut Entries<String, Value>| {
    ///     Ok::<_, Infallible>(std::mem::take(items))
    /// });
    /// buffer.set_path("a.aa.aaa", json!(1))?.set_path("a.aa.aab", json!(2))?;
    /// assert_eq!(buffer.count(), 1);
    ///
    /// let flushed = buffer.flush()?.unwrap();
    /// assert_eq!(flushed.get(&"a".to_string()), Some(&json!({"aa": {"aaa": 1, "aab": 2}})));
    /// # }
    /// # Ok::<(), std::convert::Infallible>(())
    /// ```
    pub fn set_path(&mut self, path: impl Into<Path>, value: V) -> Result<&mut Self, E>
    where
        V: PathValue + Clone,
        K: From<String>,
    {
        let (root, rest) = path.into().into_root();
        let key = K::from(root);
        let current = self.data.get(&key).cloned().unwrap_or_else(V::empty);
        self.add(current.assign(&rest, value), Some(key))
    }

    /// Returns the number of counted items since the last flush.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns true if nothing was counted since the last flush.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the configured threshold (`0` when automatic flushing is off).
    pub fn buffer_size(&self) -> usize {
        self.size
    }

    /// Returns the live container.
    pub fn contents(&self) -> &C {
        &self.data
    }

    /// Flushes if anything is buffered.
    ///
    /// Returns `Ok(None)` without calling the handler when the buffer is
    /// empty, otherwise the handler's result.
    pub fn flush(&mut self) -> Result<Option<R>, E> {
        if self.count == 0 {
            return Ok(None);
        }
        self.force_flush().map(Some)
    }

    /// Flushes even if the buffer is empty.
    pub fn force_flush(&mut self) -> Result<R, E> {
        tracing::trace!(count = self.count, "flushing buffer");
        let result = (self.handler)(&mut self.data)?;
        self.reset();
        Ok(result)
    }

    fn reset(&mut self) {
        self.data = (self.factory)();
        self.count = 0;
    }
}

impl<K, V, C, R, E> std::fmt::Debug for FlushingBuffer<'_, K, V, C, R, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlushingBuffer")
            .field("size", &self.size)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}
