//! chunkbuf
//!
//! Chunked item processing for Rust.
//!
//! `chunkbuf` provides two small, composable primitives for batch work:
//!
//! - [`ChunkProcessor`] groups items from a source into fixed-size chunks,
//!   hands each chunk to a handler and lazily yields the flattened output
//! - [`FlushingBuffer`] accumulates items (optionally keyed) and calls a
//!   flush handler whenever a size threshold is reached
//!
//! The crate intentionally:
//! - does NOT manage concurrency
//! - does NOT retry or recover failed handlers
//! - does NOT persist anything
//!
//! # ChunkProcessor
//!
//! ```
//! use chunkbuf::{ChunkProcessor, Entry};
//! use std::convert::Infallible;
//!
//! let output = ChunkProcessor::process(vec![1, 2, 3, 4, 5], 2, |chunk: Vec<i32>| {
//!     Ok::<_, Infallible>(chunk.into_iter().map(|n| Entry::new(n * 10)))
//! });
//!
//! for item in output {
//!     let (key, value) = item?;
//!     println!("{key} => {value}");
//! }
//! # Ok::<(), Infallible>(())
//! ```
//!
//! # FlushingBuffer
//!
//! ```
//! use chunkbuf::FlushingBuffer;
//!
//! let mut buffer = FlushingBuffer::new(100, |rows: &mut Vec<String>| {
//!     println!("writing {} rows", rows.len());
//!     Ok::<_, std::io::Error>(())
//! });
//!
//! for i in 0..250 {
//!     buffer.add(format!("row {i}"), None)?;
//! }
//! buffer.flush()?;
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Logging
//!
//! Chunk dispatches and flushes are reported as [`tracing`] events at
//! `trace` and `debug` level. Install any subscriber to see them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunker;
mod config;
mod container;
mod entry;
mod error;
mod flushing;
mod path;

//
// Public surface
//

pub use chunker::{ChunkProcessor, Consume, Source};
pub use config::ChunkConfig;
pub use container::{Container, Entries, Factory};
pub use entry::{Entry, Key};
pub use error::Error;
pub use flushing::FlushingBuffer;
pub use path::{Path, PathValue};
