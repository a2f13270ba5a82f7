//! Node types and the core tree node struct.

use serde::{Deserialize, Serialize};

/// Discriminator controlling how a node's content is interpreted.
///
/// Unknown names read from storage are kept verbatim in [`NodeType::Other`]
/// so a load/save cycle never drops them. Types compare by [`NodeType::name`],
/// so `Other("STEAM")` and `Steam` are the same type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    /// The tree root.
    Root,
    /// A structural node that groups a family of children (chat history, logs).
    Operator,
    /// A container node.
    Holder,
    /// A conversational history entry (one per memory tag).
    Steam,
    /// A terminal entry such as a single chat.
    Leaf,
    /// A type name this version does not know about.
    Other(String),
}

impl NodeType {
    /// Return the canonical name for this node type.
    pub fn name(&self) -> &str {
        match self {
            Self::Root => "ROOT",
            Self::Operator => "OPERATOR",
            Self::Holder => "HOLDER",
            Self::Steam => "STEAM",
            Self::Leaf => "LEAF",
            Self::Other(name) => name,
        }
    }

    /// Parse a node type. Only the exact upper-case names are built in;
    /// anything else becomes [`NodeType::Other`] with the name untouched.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ROOT" => Self::Root,
            "OPERATOR" => Self::Operator,
            "HOLDER" => Self::Holder,
            "STEAM" => Self::Steam,
            "LEAF" => Self::Leaf,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Whether this is one of the built-in node types.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl PartialEq for NodeType {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for NodeType {}

impl std::hash::Hash for NodeType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl From<String> for NodeType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The payload attached to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    content: String,
    node_type: NodeType,
}

impl NodeData {
    /// Create a payload with the given content and type.
    pub fn new(content: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            content: content.into(),
            node_type,
        }
    }

    /// The serialized content (a JSON value by convention).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The node type. Fixed for the lifetime of the node.
    pub fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }
}

/// A single addressable unit in the memory tree.
///
/// Id and type are fixed at construction. Children are owned and kept in
/// insertion order; once a node is inside a [`NeuronTree`](crate::tree::NeuronTree)
/// it can only be changed through the tree so the id index stays valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeuronNode {
    id: String,
    data: NodeData,
    children: Vec<NeuronNode>,
}

impl NeuronNode {
    /// Create a childless node.
    pub fn new(id: impl Into<String>, data: NodeData) -> Self {
        Self {
            id: id.into(),
            data,
            children: Vec::new(),
        }
    }

    /// Create a childless node with a random UUID id.
    pub fn with_generated_id(data: NodeData) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), data)
    }

    /// Append a child while building a detached subtree.
    pub fn with_child(mut self, child: NeuronNode) -> Self {
        self.children.push(child);
        self
    }

    /// The node's unique id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The node's payload.
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Shortcut for `data().content()`.
    pub fn content(&self) -> &str {
        self.data.content()
    }

    /// Shortcut for `data().node_type()`.
    pub fn node_type(&self) -> &NodeType {
        self.data.node_type()
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> &[NeuronNode] {
        &self.children
    }

    /// Number of nodes in this subtree, including this node.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(NeuronNode::subtree_len)
            .sum::<usize>()
    }

    pub(crate) fn data_mut(&mut self) -> &mut NodeData {
        &mut self.data
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NeuronNode> {
        &mut self.children
    }
}
