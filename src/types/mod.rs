//! All data types for the neuron memory library.

pub mod error;
pub mod header;
pub mod node;
pub mod tag;

pub use error::{NeuronError, NeuronResult};
pub use header::{BrainHeader, HEADER_SIZE};
pub use node::{NeuronNode, NodeData, NodeType};
pub use tag::MemoryTag;

/// Magic bytes at the start of every .brain file.
pub const BRAIN_MAGIC: [u8; 4] = [0x4E, 0x52, 0x54, 0x42]; // "NRTB"

/// Current format version.
pub const FORMAT_VERSION: u32 = 1;

/// Header flag: payload is LZ4-compressed.
pub const FLAG_LZ4: u32 = 0x1;

/// Returns the current time as Unix epoch microseconds.
pub fn now_micros() -> u64 {
    chrono::Utc::now().timestamp_micros() as u64
}
