//! NeuronMemory — hierarchical, tag-addressable memory for AI assistants.
//!
//! Long-lived context (per-topic chat history, user facts) lives in a tree of
//! typed nodes. Every node is reachable by a unique id through an index that
//! is kept in step with the tree, and a small facade maps memory categories
//! onto nodes under the canonical history node.

pub mod cli;
pub mod config;
pub mod format;
pub mod index;
pub mod memory;
pub mod tree;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::NeuronConfig;
pub use format::{BrainReader, BrainWriter, NodeRecord};
pub use index::IdIndex;
pub use memory::{
    default_brain, migrate_brain, HistoryLocator, MemoryFacade, MigrationReport, NamedHistory,
};
pub use tree::{NeuronTree, Preorder, SharedTree};
pub use types::{
    now_micros, BrainHeader, MemoryTag, NeuronError, NeuronNode, NeuronResult, NodeData,
    NodeType, HEADER_SIZE,
};
