//! Configuration for chunked processing.
//!
//! - [`ChunkConfig`] - Chunk size and output key shaping
//!
//! # Example
//!
//! ```
//! use chunkbuf::ChunkConfig;
//!
//! // Hand items to the handler three at a time
//! let config = ChunkConfig::new(3);
//!
//! // Collect the whole source into one chunk, keep handler keys
//! let config = ChunkConfig::unbounded().with_preserve_keys(true);
//! assert!(!config.is_bounded());
//! ```

/// Configuration for a [`ChunkProcessor`](crate::ChunkProcessor).
///
/// A size of `0` disables size-triggered chunking: the whole source is
/// collected into a single chunk which is handed over once the source is
/// exhausted.
///
/// Key preservation decides how items yielded by the processor are keyed:
///
/// - disabled (default): items are re-indexed `0, 1, 2, ...` across all chunks
/// - enabled: keys emitted by the handler are passed through unchanged
///
/// # Example
///
/// ```
/// use chunkbuf::ChunkConfig;
///
/// let config = ChunkConfig::new(100).with_preserve_keys(true);
/// assert_eq!(config.size(), 100);
/// assert!(config.preserve_keys());
///
/// // Plain sizes convert directly
/// let config: ChunkConfig = 2.into();
/// assert_eq!(config.size(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkConfig {
    /// Number of items per chunk, `0` for unbounded.
    size: usize,

    /// Whether handler-emitted keys survive into the output.
    preserve_keys: bool,
}

impl ChunkConfig {
    /// Creates a configuration with the given chunk size.
    ///
    /// # Arguments
    ///
    /// * `size` - Items per chunk; `0` disables chunking by size
    pub const fn new(size: usize) -> Self {
        Self {
            size,
            preserve_keys: false,
        }
    }

    /// Creates a configuration that never chunks by size.
    pub const fn unbounded() -> Self {
        Self::new(0)
    }

    /// Sets the chunk size.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkbuf::ChunkConfig;
    ///
    /// let config = ChunkConfig::unbounded().with_size(8);
    /// assert_eq!(config.size(), 8);
    /// ```
    pub const fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets whether handler-emitted keys are passed through.
    pub const fn with_preserve_keys(mut self, preserve: bool) -> Self {
        self.preserve_keys = preserve;
        self
    }

    /// Returns the chunk size (`0` when unbounded).
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns whether handler-emitted keys are passed through.
    pub const fn preserve_keys(&self) -> bool {
        self.preserve_keys
    }

    /// Returns true if chunks are cut by size.
    pub const fn is_bounded(&self) -> bool {
        self.size > 0
    }
}

impl From<usize> for ChunkConfig {
    fn from(size: usize) -> Self {
        Self::new(size)
    }
}
