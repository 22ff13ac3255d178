//! Entry types.
//!
//! - [`Entry`] - Value with an optional key, going into containers and out of handlers
//! - [`Key`] - Key of an item yielded by a chunk processor

mod data;
mod key;

pub use data::Entry;
pub use key::Key;
