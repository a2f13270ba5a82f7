//! Core tree structure — an owned root plus an id index kept in step with it.

use crate::index::IdIndex;
use crate::types::{NeuronError, NeuronNode, NeuronResult};

use super::traversal::{render_subtree, Preorder};

/// Segment used for the root in textual node paths.
pub const ROOT_PATH: &str = "root";

/// Structural operations over a root [`NeuronNode`] with O(1) id lookup.
///
/// The id index is built once when the tree is created and updated on every
/// structural mutation, so reads never re-walk the tree.
#[derive(Debug, Clone)]
pub struct NeuronTree {
    root: NeuronNode,
    index: IdIndex,
}

impl NeuronTree {
    /// Take ownership of `root` and index every node under it.
    pub fn new(root: NeuronNode) -> NeuronResult<Self> {
        let index = IdIndex::build(&root)?;
        log::debug!("Indexed {} nodes under '{}'", index.len(), root.id());
        Ok(Self { root, index })
    }

    /// The root node.
    pub fn root(&self) -> &NeuronNode {
        &self.root
    }

    /// Give back ownership of the root.
    pub fn into_root(self) -> NeuronNode {
        self.root
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether a node with `id` exists anywhere in the tree.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// Get a node by id.
    pub fn get_node(&self, id: &str) -> Option<&NeuronNode> {
        let path = self.index.path(id)?;
        node_at(&self.root, path)
    }

    /// Positional path of a node, e.g. `root/0/2`.
    pub fn node_path(&self, id: &str) -> Option<String> {
        let path = self.index.path(id)?;
        let mut out = String::from(ROOT_PATH);
        for pos in path {
            out.push('/');
            out.push_str(&pos.to_string());
        }
        Some(out)
    }

    /// Append `child` (with any descendants it already has) under `parent_id`.
    ///
    /// Nothing changes unless every id in `child`'s subtree is new.
    pub fn add_child(&mut self, parent_id: &str, child: NeuronNode) -> NeuronResult<()> {
        self.add_children(parent_id, vec![child])
    }

    /// Append several children under `parent_id`, in order, all or nothing.
    pub fn add_children(&mut self, parent_id: &str, children: Vec<NeuronNode>) -> NeuronResult<()> {
        let parent_path = self
            .index
            .path(parent_id)
            .ok_or_else(|| NeuronError::ParentNotFound(parent_id.to_string()))?
            .to_vec();

        // Validate the whole batch against the tree and against itself.
        let mut staged = IdIndex::new();
        for child in &children {
            if let Some(id) = self.index.find_collision(child) {
                return Err(NeuronError::DuplicateId(id));
            }
            if let Some(id) = staged.find_collision(child) {
                return Err(NeuronError::DuplicateId(id));
            }
            staged.insert_subtree(child, Vec::new())?;
        }

        let parent = node_at_mut(&mut self.root, &parent_path)
            .ok_or_else(|| NeuronError::ParentNotFound(parent_id.to_string()))?;

        for child in children {
            let pos = parent.children().len();
            let mut child_path = parent_path.clone();
            child_path.push(pos);
            log::debug!("Adding '{}' under '{}' at {}", child.id(), parent_id, pos);
            parent.children_mut().push(child);
            self.index
                .insert_subtree(&parent.children()[pos], child_path)?;
        }
        Ok(())
    }

    /// Replace a node's content in place. Id, type and structure are untouched.
    pub fn set_content(&mut self, id: &str, content: impl Into<String>) -> NeuronResult<()> {
        let node = self
            .index
            .path(id)
            .and_then(|path| node_at_mut(&mut self.root, path))
            .ok_or_else(|| NeuronError::NodeNotFound(id.to_string()))?;
        node.data_mut().set_content(content.into());
        Ok(())
    }

    /// Remove a node together with its whole subtree and return it.
    pub fn remove_node(&mut self, id: &str) -> NeuronResult<NeuronNode> {
        if id == self.root.id() {
            log::warn!("Attempted to remove root '{}', refused", id);
            return Err(NeuronError::RootRemoval);
        }
        let path = self
            .index
            .path(id)
            .ok_or_else(|| NeuronError::NodeNotFound(id.to_string()))?
            .to_vec();
        let (&pos, parent_path) = path
            .split_last()
            .ok_or(NeuronError::RootRemoval)?;

        let parent = node_at_mut(&mut self.root, parent_path)
            .ok_or_else(|| NeuronError::NodeNotFound(id.to_string()))?;
        let removed = parent.children_mut().remove(pos);
        self.index.remove_subtree(&removed, parent_path, pos);

        log::debug!(
            "Removed '{}' and {} descendants",
            id,
            removed.subtree_len() - 1
        );
        Ok(removed)
    }

    /// Depth-first pre-order walk over every node.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder::new(&self.root)
    }

    /// All ids in depth-first pre-order.
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(NeuronNode::id).collect()
    }

    /// Indented dump of the whole tree, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_subtree(&self.root, 0, &mut out);
        out
    }
}

impl<'a> IntoIterator for &'a NeuronTree {
    type Item = &'a NeuronNode;
    type IntoIter = Preorder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn node_at<'a>(root: &'a NeuronNode, path: &[usize]) -> Option<&'a NeuronNode> {
    let mut node = root;
    for &pos in path {
        node = node.children().get(pos)?;
    }
    Some(node)
}

fn node_at_mut<'a>(root: &'a mut NeuronNode, path: &[usize]) -> Option<&'a mut NeuronNode> {
    let mut node = root;
    for &pos in path {
        node = node.children_mut().get_mut(pos)?;
    }
    Some(node)
}
