//! The recursive JSON schema trees are persisted in.
//!
//! Every node serializes as
//! `{ "id": string, "type": string, "content": string, "children": [...] }`.

use serde::{Deserialize, Serialize};

use crate::tree::NeuronTree;
use crate::types::{NeuronError, NeuronNode, NeuronResult, NodeData, NodeType};

/// Wire shape of one node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub children: Vec<NodeRecord>,
}

impl From<&NeuronNode> for NodeRecord {
    fn from(node: &NeuronNode) -> Self {
        Self {
            id: node.id().to_string(),
            node_type: node.node_type().clone(),
            content: node.content().to_string(),
            children: node.children().iter().map(NodeRecord::from).collect(),
        }
    }
}

impl From<NodeRecord> for NeuronNode {
    fn from(record: NodeRecord) -> Self {
        let node = NeuronNode::new(record.id, NodeData::new(record.content, record.node_type));
        record
            .children
            .into_iter()
            .fold(node, |parent, child| parent.with_child(child.into()))
    }
}

/// Serialize a subtree to JSON bytes.
pub fn to_json_bytes(root: &NeuronNode, pretty: bool) -> NeuronResult<Vec<u8>> {
    let record = NodeRecord::from(root);
    let bytes = if pretty {
        serde_json::to_vec_pretty(&record)
    } else {
        serde_json::to_vec(&record)
    };
    bytes.map_err(|e| NeuronError::CorruptData(e.to_string()))
}

/// Serialize a subtree to a JSON string.
pub fn to_json_string(root: &NeuronNode, pretty: bool) -> NeuronResult<String> {
    let bytes = to_json_bytes(root, pretty)?;
    String::from_utf8(bytes).map_err(|e| NeuronError::CorruptData(e.to_string()))
}

/// Decode a subtree from JSON bytes.
///
/// Each tree level nests two JSON levels (the node object and its
/// `children` array), so serde_json's default depth limit would reject any
/// tree `add_child` can build past roughly 64 levels. The limit is lifted.
pub fn node_from_json(bytes: &[u8]) -> NeuronResult<NeuronNode> {
    let corrupt = |e: serde_json::Error| NeuronError::CorruptData(e.to_string());
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let record = NodeRecord::deserialize(&mut de).map_err(corrupt)?;
    de.end().map_err(corrupt)?;
    Ok(record.into())
}

/// Decode and index a whole tree. Repeated ids are reported as corruption.
pub fn tree_from_json(bytes: &[u8]) -> NeuronResult<NeuronTree> {
    let root = node_from_json(bytes)?;
    NeuronTree::new(root).map_err(|e| match e {
        NeuronError::DuplicateId(id) => {
            NeuronError::CorruptData(format!("duplicate node id '{}'", id))
        }
        other => other,
    })
}
