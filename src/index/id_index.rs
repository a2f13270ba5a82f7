//! Index by node id — maps each id to its child-position path from the root.

use std::collections::HashMap;

use crate::types::{NeuronError, NeuronNode, NeuronResult};

/// Maps each node id to the sequence of child positions leading to it.
///
/// The root maps to the empty path. Paths stay valid as long as no sibling
/// before a node is removed; removal shifts the affected entries in place.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    paths: HashMap<String, Vec<usize>>,
}

impl IdIndex {
    /// Create a new, empty id index.
    pub fn new() -> Self {
        Self {
            paths: HashMap::new(),
        }
    }

    /// Build the index with one depth-first pre-order walk from `root`.
    pub fn build(root: &NeuronNode) -> NeuronResult<Self> {
        let mut index = Self::new();
        index.insert_subtree(root, Vec::new())?;
        Ok(index)
    }

    /// Path of positions from the root to `id`.
    pub fn path(&self, id: &str) -> Option<&[usize]> {
        self.paths.get(id).map(|p| p.as_slice())
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.paths.contains_key(id)
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Register `node` and every descendant, `node` living at `path`.
    ///
    /// Fails on the first id already present; callers that need atomicity
    /// check with [`IdIndex::find_collision`] first.
    pub fn insert_subtree(&mut self, node: &NeuronNode, path: Vec<usize>) -> NeuronResult<()> {
        if self.paths.contains_key(node.id()) {
            return Err(NeuronError::DuplicateId(node.id().to_string()));
        }
        self.paths.insert(node.id().to_string(), path.clone());
        for (pos, child) in node.children().iter().enumerate() {
            let mut child_path = path.clone();
            child_path.push(pos);
            self.insert_subtree(child, child_path)?;
        }
        Ok(())
    }

    /// First id in `node`'s subtree that is already indexed or that repeats
    /// inside the subtree itself.
    pub fn find_collision(&self, node: &NeuronNode) -> Option<String> {
        let mut seen = std::collections::HashSet::new();
        self.find_collision_in(node, &mut seen)
    }

    fn find_collision_in<'n>(
        &self,
        node: &'n NeuronNode,
        seen: &mut std::collections::HashSet<&'n str>,
    ) -> Option<String> {
        if self.paths.contains_key(node.id()) || !seen.insert(node.id()) {
            return Some(node.id().to_string());
        }
        node.children()
            .iter()
            .find_map(|child| self.find_collision_in(child, seen))
    }

    /// Drop `removed` and its descendants, which used to sit at position
    /// `pos` under the node at `parent_path`, and shift later siblings left.
    pub fn remove_subtree(&mut self, removed: &NeuronNode, parent_path: &[usize], pos: usize) {
        self.forget(removed);
        let depth = parent_path.len();
        for path in self.paths.values_mut() {
            if path.len() > depth && path[..depth] == *parent_path && path[depth] > pos {
                path[depth] -= 1;
            }
        }
    }

    fn forget(&mut self, node: &NeuronNode) {
        self.paths.remove(node.id());
        for child in node.children() {
            self.forget(child);
        }
    }
}
