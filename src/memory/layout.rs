//! The standard brain skeleton and forward migration of older brains.

use serde_json::json;

use crate::tree::NeuronTree;
use crate::types::{MemoryTag, NeuronNode, NeuronResult, NodeData, NodeType};

use super::facade::{HistoryLocator, MemoryFacade};
use super::{
    CHAT_HISTORY_ID, MEMORY_HISTORY_ID, MODEL_STATE_ID, ROOT_ID, SAVED_TTS_ID, SYSTEM_LOGS_ID,
};

/// Ids added by a [`migrate_brain`] run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Operator nodes that were missing and got created.
    pub added_operators: Vec<String>,
    /// Tags whose memory node was missing and got created.
    pub added_tags: Vec<MemoryTag>,
}

impl MigrationReport {
    /// Whether the migration changed nothing.
    pub fn is_empty(&self) -> bool {
        self.added_operators.is_empty() && self.added_tags.is_empty()
    }
}

fn operator(id: &str) -> NeuronNode {
    NeuronNode::new(id, NodeData::new("", NodeType::Operator))
}

fn system_logs() -> NeuronNode {
    let content = json!({"title": "System Logs", "sessions": []});
    NeuronNode::new(
        SYSTEM_LOGS_ID,
        NodeData::new(content.to_string(), NodeType::Operator),
    )
}

/// Build a fresh brain: the root, its operator nodes, and an empty memory
/// node for every tag.
pub fn default_brain<L: HistoryLocator>(facade: &MemoryFacade<L>) -> NeuronResult<NeuronTree> {
    let root = NeuronNode::new(ROOT_ID, NodeData::new("", NodeType::Root));
    let mut tree = NeuronTree::new(root)?;

    tree.add_children(
        ROOT_ID,
        vec![
            operator(CHAT_HISTORY_ID),
            operator(MEMORY_HISTORY_ID),
            operator(MODEL_STATE_ID),
            system_logs(),
            operator(SAVED_TTS_ID),
        ],
    )?;

    let empty = json!({});
    for tag in MemoryTag::ALL {
        facade.create_new_memory(&mut tree, tag, &empty)?;
    }

    log::info!("Built default brain with {} nodes", tree.len());
    Ok(tree)
}

/// Add whatever required nodes an older brain is missing. Running it twice
/// is a no-op the second time.
pub fn migrate_brain<L: HistoryLocator>(
    tree: &mut NeuronTree,
    facade: &MemoryFacade<L>,
) -> NeuronResult<MigrationReport> {
    let mut report = MigrationReport::default();
    let root_id = tree.root().id().to_string();

    let required = [
        operator(CHAT_HISTORY_ID),
        operator(MEMORY_HISTORY_ID),
        system_logs(),
    ];
    for node in required {
        if !tree.contains(node.id()) {
            report.added_operators.push(node.id().to_string());
            tree.add_child(&root_id, node)?;
        }
    }

    let seed = json!({"messages": []});
    for tag in MemoryTag::ALL {
        if facade.get_memory_by_tag(tree, tag).is_none() {
            facade.create_new_memory(tree, tag, &seed)?;
            report.added_tags.push(tag);
        }
    }

    if !report.is_empty() {
        log::info!(
            "Migrated brain: {} operators, {} tags added",
            report.added_operators.len(),
            report.added_tags.len()
        );
    }
    Ok(report)
}
