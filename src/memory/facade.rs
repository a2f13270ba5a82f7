//! Tag-based memory operations on top of [`NeuronTree`].

use serde_json::Value;

use crate::tree::NeuronTree;
use crate::types::{MemoryTag, NeuronError, NeuronNode, NeuronResult, NodeData, NodeType};

use super::{CHAT_HISTORY_ID, MEMORY_HISTORY_ID};

/// Decides where new memories and chats attach in a tree.
pub trait HistoryLocator {
    /// The node tag memories are created under.
    fn memory_history<'t>(&self, tree: &'t NeuronTree) -> Option<&'t NeuronNode>;

    /// The node chat entries are appended to.
    fn chat_history<'t>(&self, tree: &'t NeuronTree) -> Option<&'t NeuronNode>;
}

/// Locates the history nodes by fixed ids.
#[derive(Debug, Clone)]
pub struct NamedHistory {
    pub memory_id: String,
    pub chat_id: String,
}

impl Default for NamedHistory {
    fn default() -> Self {
        Self {
            memory_id: MEMORY_HISTORY_ID.to_string(),
            chat_id: CHAT_HISTORY_ID.to_string(),
        }
    }
}

impl HistoryLocator for NamedHistory {
    fn memory_history<'t>(&self, tree: &'t NeuronTree) -> Option<&'t NeuronNode> {
        tree.get_node(&self.memory_id)
    }

    fn chat_history<'t>(&self, tree: &'t NeuronTree) -> Option<&'t NeuronNode> {
        tree.get_node(&self.chat_id)
    }
}

/// Maps [`MemoryTag`]s onto tree nodes, hiding id casing and the location
/// of the history subtree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFacade<L: HistoryLocator = NamedHistory> {
    locator: L,
}

impl MemoryFacade<NamedHistory> {
    /// Facade using the standard `memoryHistory` / `chatHistory` nodes.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: HistoryLocator> MemoryFacade<L> {
    /// Facade using a custom locator.
    pub fn with_locator(locator: L) -> Self {
        Self { locator }
    }

    /// Create the node for `tag` under the memory history node.
    ///
    /// Fails with `DuplicateId` if the tag already has a node; existing
    /// memories are never overwritten here.
    pub fn create_new_memory(
        &self,
        tree: &mut NeuronTree,
        tag: MemoryTag,
        data: &Value,
    ) -> NeuronResult<NeuronNode> {
        let history_id = self
            .locator
            .memory_history(tree)
            .map(|node| node.id().to_string())
            .ok_or_else(|| NeuronError::NodeNotFound("memory history".to_string()))?;

        let node = NeuronNode::new(tag.node_id(), NodeData::new(encode(data)?, NodeType::Steam));
        tree.add_child(&history_id, node.clone())?;
        log::info!("Created memory '{}' under '{}'", tag.node_id(), history_id);
        Ok(node)
    }

    /// The node backing `tag`, if it has been created.
    pub fn get_memory_by_tag<'t>(
        &self,
        tree: &'t NeuronTree,
        tag: MemoryTag,
    ) -> Option<&'t NeuronNode> {
        tree.get_node(tag.node_id())
    }

    /// Replace the content of an existing tag node.
    pub fn update_memory(
        &self,
        tree: &mut NeuronTree,
        tag: MemoryTag,
        data: &Value,
    ) -> NeuronResult<()> {
        tree.set_content(tag.node_id(), encode(data)?)?;
        log::debug!("Updated memory '{}'", tag.node_id());
        Ok(())
    }

    /// Parse the stored content of a tag node.
    pub fn read_memory(&self, tree: &NeuronTree, tag: MemoryTag) -> NeuronResult<Value> {
        let node = self
            .get_memory_by_tag(tree, tag)
            .ok_or_else(|| NeuronError::NodeNotFound(tag.node_id().to_string()))?;
        decode(node)
    }

    /// Append a chat entry with a generated id under the chat history node.
    pub fn add_new_chat(&self, tree: &mut NeuronTree, data: &Value) -> NeuronResult<NeuronNode> {
        let chat_id = self
            .locator
            .chat_history(tree)
            .map(|node| node.id().to_string())
            .ok_or_else(|| NeuronError::NodeNotFound("chat history".to_string()))?;

        let node = NeuronNode::with_generated_id(NodeData::new(encode(data)?, NodeType::Leaf));
        tree.add_child(&chat_id, node.clone())?;
        Ok(node)
    }
}

/// Parse a node's content as JSON.
pub fn decode(node: &NeuronNode) -> NeuronResult<Value> {
    serde_json::from_str(node.content())
        .map_err(|e| NeuronError::CorruptData(format!("content of '{}': {}", node.id(), e)))
}

fn encode(data: &Value) -> NeuronResult<String> {
    serde_json::to_string(data).map_err(|e| NeuronError::CorruptData(e.to_string()))
}
