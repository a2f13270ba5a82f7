//! In-memory tree operations — the core data structure.

pub mod neuron_tree;
pub mod shared;
pub mod traversal;

pub use neuron_tree::{NeuronTree, ROOT_PATH};
pub use shared::SharedTree;
pub use traversal::Preorder;
