//! The lazy chunk-transform iterator.
//!
//! [`Consume`] is a pull-driven state machine: every call to `next()` first
//! drains the output of the most recent handler invocation, and only when
//! that is exhausted pulls more items from the source. Stopping iteration
//! therefore stops all source reads and handler calls.

use std::iter::FusedIterator;

use super::source::{EntryIter, Source};
use crate::config::ChunkConfig;
use crate::container::{Container, Factory};
use crate::entry::{Entry, Key};

/// Chunk handler: receives a filled container, returns the items to yield.
pub(crate) type Handler<'a, C, O, E> = Box<dyn FnMut(C) -> Result<O, E> + 'a>;

/// An iterator over the flattened output of a chunk handler.
///
/// Created by [`ChunkProcessor::consume`](crate::ChunkProcessor::consume).
/// It is single-pass: once exhausted (or after yielding an error) it keeps
/// returning `None`.
///
/// Each item is `Ok((key, value))`, where the key follows the
/// [`ChunkConfig::preserve_keys`] policy, or `Err(e)` carrying the first
/// error raised by the source or the handler.
pub struct Consume<'a, K, V, C, O, E>
where
    O: IntoIterator,
{
    /// Not yet resolved; taken on the first pull.
    source: Option<Source<'a, K, V, E>>,
    entries: Option<EntryIter<'a, K, V, E>>,
    config: ChunkConfig,
    handler: Handler<'a, C, O, E>,
    factory: Factory<'a, C>,
    /// Created lazily, so no container is built for an empty tail.
    buffer: Option<C>,
    /// Items placed in the current buffer generation.
    filled: usize,
    /// Output of the most recent handler call, still being drained.
    output: Option<O::IntoIter>,
    /// Position within `output`.
    position: usize,
    /// Items yielded so far.
    emitted: usize,
    finished: bool,
}

impl<'a, K, V, C, O, E> Consume<'a, K, V, C, O, E>
where
    O: IntoIterator,
{
    pub(crate) fn new(
        source: Source<'a, K, V, E>,
        config: ChunkConfig,
        handler: Handler<'a, C, O, E>,
        factory: Factory<'a, C>,
    ) -> Self {
        Self {
            source: Some(source),
            entries: None,
            config,
            handler,
            factory,
            buffer: None,
            filled: 0,
            output: None,
            position: 0,
            emitted: 0,
            finished: false,
        }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Returns the number of items yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Returns the number of source items waiting in the current chunk.
    pub fn pending(&self) -> usize {
        self.filled
    }

    /// Pulls the next source item, resolving the source on first use.
    fn pull(&mut self) -> Option<Result<Entry<K, V>, E>> {
        if self.entries.is_none() {
            let source = self.source.take()?;
            self.entries = Some(source.resolve());
        }
        self.entries.as_mut().and_then(|entries| entries.next())
    }

    /// Hands the current buffer to the handler and starts draining its output.
    fn dispatch(&mut self) -> Result<(), E> {
        let items = std::mem::take(&mut self.filled);
        let chunk = match self.buffer.take() {
            Some(buffer) => buffer,
            None => (self.factory)(),
        };

        tracing::trace!(items, "dispatching chunk");

        let output = (self.handler)(chunk)?;
        self.output = Some(output.into_iter());
        self.position = 0;
        Ok(())
    }

    /// Stops iteration and releases the source and any pending output.
    fn finish(&mut self) {
        self.finished = true;
        self.source = None;
        self.entries = None;
        self.output = None;
        self.buffer = None;
    }
}

impl<'a, K, V, C, O, E> Consume<'a, K, V, C, O, E>
where
    C: Container<K, V>,
    O: IntoIterator,
{
    /// Places a source entry into the current buffer.
    fn stash(&mut self, entry: Entry<K, V>) {
        let buffer = self.buffer.get_or_insert_with(|| (self.factory)());
        match entry.key {
            Some(key) => {
                buffer.insert(key, entry.value);
            }
            None => buffer.push(entry.value),
        }
        self.filled += 1;
    }
}

impl<'a, K, V, C, O, E, T> Iterator for Consume<'a, K, V, C, O, E>
where
    C: Container<K, V>,
    O: IntoIterator<Item = Entry<K, T>>,
{
    type Item = Result<(Key<K>, T), E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(output) = self.output.as_mut() {
                match output.next() {
                    Some(entry) => {
                        let key = if self.config.preserve_keys() {
                            entry.key.map_or(Key::Index(self.position), Key::Name)
                        } else {
                            Key::Index(self.emitted)
                        };
                        self.position += 1;
                        self.emitted += 1;
                        return Some(Ok((key, entry.value)));
                    }
                    None => self.output = None,
                }
            }

            if self.finished {
                return None;
            }

            match self.pull() {
                Some(Ok(entry)) => {
                    self.stash(entry);
                    if self.config.is_bounded() && self.filled == self.config.size() {
                        if let Err(err) = self.dispatch() {
                            self.finish();
                            return Some(Err(err));
                        }
                    }
                }
                Some(Err(err)) => {
                    self.finish();
                    return Some(Err(err));
                }
                None => {
                    self.finished = true;
                    self.entries = None;
                    // Trailing partial chunk; nothing is dispatched for an empty one.
                    if self.filled > 0 {
                        if let Err(err) = self.dispatch() {
                            self.finish();
                            return Some(Err(err));
                        }
                    }
                }
            }
        }
    }
}

impl<'a, K, V, C, O, E, T> FusedIterator for Consume<'a, K, V, C, O, E>
where
    C: Container<K, V>,
    O: IntoIterator<Item = Entry<K, T>>,
{
}

impl<K, V, C, O, E> std::fmt::Debug for Consume<'_, K, V, C, O, E>
where
    O: IntoIterator,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consume")
            .field("config", &self.config)
            .field("pending", &self.filled)
            .field("emitted", &self.emitted)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
