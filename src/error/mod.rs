//! Error types for chunkbuf.
//!
//! Handler and source failures are never wrapped: they keep the caller's own
//! error type and surface exactly where they were raised. [`Error`] only
//! covers failures the crate detects itself.

/// Errors raised by chunkbuf itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A path was built from an empty segment list.
    ///
    /// Every path needs at least a root segment naming the buffer key.
    #[error("invalid path: at least one segment is required")]
    EmptyPath,
}
