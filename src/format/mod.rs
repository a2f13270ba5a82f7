//! Persistence: the JSON tree schema and the binary .brain container.

pub mod compression;
pub mod json;
pub mod reader;
pub mod writer;

pub use json::{node_from_json, to_json_string, tree_from_json, NodeRecord};
pub use reader::BrainReader;
pub use writer::BrainWriter;
