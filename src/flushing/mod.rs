//! Auto-flushing accumulator.
//!
//! - [`FlushingBuffer`] - Collects items and hands them to a flush handler
//!   whenever a size threshold is reached, or on request

mod buffer;

pub use buffer::FlushingBuffer;
