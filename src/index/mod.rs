//! Index structures for fast lookup.

pub mod id_index;

pub use id_index::IdIndex;
