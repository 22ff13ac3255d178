//! Chunked transform over a source of items.
//!
//! - [`Source`] - Items to pull, ready or produced on demand
//! - [`ChunkProcessor`] - Batches a source and hands each batch to a handler
//! - [`Consume`] - Lazy iterator over the flattened handler output

mod engine;
mod iter;
mod source;

pub use engine::ChunkProcessor;
pub use iter::Consume;
pub use source::Source;
