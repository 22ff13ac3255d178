//! ChunkProcessor - batches a source and flattens handler output.
//!
//! A [`ChunkProcessor`] is configured once and consumed once:
//!
//! - items are pulled from the [`Source`] in order
//! - every `size` items, the filled container goes to the handler
//! - the handler's output is yielded item by item before the next source
//!   item is pulled
//! - a trailing partial chunk is handed over when the source ends
//!
//! # Example
//!
//! ```
//! use chunkbuf::{ChunkProcessor, Entry};
//! use std::convert::Infallible;
//!
//! let upper: Vec<String> = ChunkProcessor::new(vec!["a", "b", "c"], 2, |chunk: Vec<&str>| {
//!     Ok::<_, Infallible>(chunk.into_iter().map(|s| Entry::new(s.to_uppercase())))
//! })
//! .consume()
//! .map(|item| item.map(|(_, value)| value))
//! .collect::<Result<_, _>>()?;
//!
//! assert_eq!(upper, ["A", "B", "C"]);
//! # Ok::<(), Infallible>(())
//! ```

use super::iter::{Consume, Handler};
use super::source::Source;
use crate::config::ChunkConfig;
use crate::container::{Container, Factory};
use crate::entry::{Entry, Key};

/// A chunked transform over a source of items.
///
/// # Type Parameters
///
/// * `K` - Key type of source entries and handler output entries
/// * `V` - Source value type
/// * `C` - Container handed to the handler (e.g. [`Entries`](crate::Entries), `Vec<V>`)
/// * `O` - What the handler returns; iterated lazily
/// * `E` - Error type shared by the source and the handler
///
/// # Example
///
/// ```
/// use chunkbuf::{ChunkConfig, ChunkProcessor, Entries, Entry, Key};
/// use std::collections::HashMap;
/// use std::convert::Infallible;
///
/// // Handler emits its own keys; later duplicates win when collected.
/// let processor = ChunkProcessor::new(
///     vec![1, 2, 3],
///     ChunkConfig::new(2).with_preserve_keys(true),
///     |chunk: Entries<&str, i32>| {
///         let total: i32 = chunk.values().sum();
///         Ok::<_, Infallible>([Entry::keyed("sum", total)])
///     },
/// );
///
/// let by_key: HashMap<Key<&str>, i32> = processor.consume().collect::<Result<_, _>>()?;
/// assert_eq!(by_key[&Key::Name("sum")], 3);
/// # Ok::<(), Infallible>(())
/// ```
pub struct ChunkProcessor<'a, K, V, C, O, E> {
    source: Source<'a, K, V, E>,
    config: ChunkConfig,
    handler: Handler<'a, C, O, E>,
    factory: Factory<'a, C>,
}

impl<'a, K, V, C, O, E> ChunkProcessor<'a, K, V, C, O, E>
where
    C: Container<K, V>,
{
    /// Creates a processor using `C::default()` for every new container.
    ///
    /// # Arguments
    ///
    /// * `source` - Items to process, or a [`Source`] (e.g. deferred or fallible)
    /// * `config` - A [`ChunkConfig`], or just the chunk size (`0` = one chunk)
    /// * `handler` - Called with each filled container; its output is yielded
    pub fn new<S, F>(source: S, config: impl Into<ChunkConfig>, handler: F) -> Self
    where
        S: Into<Source<'a, K, V, E>>,
        F: FnMut(C) -> Result<O, E> + 'a,
        C: Default + 'a,
    {
        Self::from_factory(source, config, handler, C::default)
    }

    /// Creates a processor that gets every container from `factory`.
    ///
    /// Unlike [`new`](Self::new), `C` does not need to implement `Default`.
    pub fn from_factory<S, F, G>(
        source: S,
        config: impl Into<ChunkConfig>,
        handler: F,
        factory: G,
    ) -> Self
    where
        S: Into<Source<'a, K, V, E>>,
        F: FnMut(C) -> Result<O, E> + 'a,
        G: FnMut() -> C + 'a,
    {
        Self {
            source: source.into(),
            config: config.into(),
            handler: Box::new(handler),
            factory: Box::new(factory),
        }
    }

    /// Replaces the container factory.
    ///
    /// The factory is called each time a fresh container is needed.
    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: FnMut() -> C + 'a,
    {
        self.factory = Box::new(factory);
        self
    }

    /// Sets whether handler-emitted keys are passed through.
    pub fn with_preserve_keys(mut self, preserve: bool) -> Self {
        self.config = self.config.with_preserve_keys(preserve);
        self
    }

    /// Returns the chunk size (`0` when unbounded).
    pub fn chunk_size(&self) -> usize {
        self.config.size()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Starts processing, returning the lazy output iterator.
    ///
    /// Nothing happens until the iterator is advanced: the source is not
    /// resolved and the handler is not called.
    pub fn consume(self) -> Consume<'a, K, V, C, O, E>
    where
        O: IntoIterator,
    {
        Consume::new(self.source, self.config, self.handler, self.factory)
    }

    /// Builds a processor and immediately returns its output iterator.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkbuf::{ChunkProcessor, Entry};
    /// use std::convert::Infallible;
    ///
    /// let sums: Vec<i32> = ChunkProcessor::process(vec![1, 2, 3, 4, 5], 2, |chunk: Vec<i32>| {
    ///     Ok::<_, Infallible>([Entry::new(chunk.iter().sum::<i32>())])
    /// })
    /// .map(|item| item.map(|(_, sum)| sum))
    /// .collect::<Result<_, _>>()?;
    ///
    /// assert_eq!(sums, [3, 7, 5]);
    /// # Ok::<(), Infallible>(())
    /// ```
    pub fn process<S, F>(
        source: S,
        config: impl Into<ChunkConfig>,
        handler: F,
    ) -> Consume<'a, K, V, C, O, E>
    where
        O: IntoIterator,
        S: Into<Source<'a, K, V, E>>,
        F: FnMut(C) -> Result<O, E> + 'a,
        C: Default + 'a,
    {
        Self::new(source, config, handler).consume()
    }
}

impl<'a, K, V, C, O, E, T> IntoIterator for ChunkProcessor<'a, K, V, C, O, E>
where
    C: Container<K, V>,
    O: IntoIterator<Item = Entry<K, T>>,
{
    type Item = Result<(Key<K>, T), E>;
    type IntoIter = Consume<'a, K, V, C, O, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.consume()
    }
}

impl<K, V, C, O, E> std::fmt::Debug for ChunkProcessor<'_, K, V, C, O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkProcessor")
            .field("source", &self.source)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
