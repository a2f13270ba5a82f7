//! A tree shared between threads: one writer at a time, many readers.

use std::path::Path;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::format::{BrainReader, BrainWriter};
use crate::memory::{HistoryLocator, MemoryFacade, NamedHistory};
use crate::types::{MemoryTag, NeuronError, NeuronNode, NeuronResult};

use super::NeuronTree;

/// Cloneable handle to a [`NeuronTree`] behind a reader/writer lock.
///
/// Every structural change and content update takes the write lock, so
/// racing `create`/`update` calls on the same tag are serialized. Lookups
/// return owned clones; no guard escapes. File I/O always happens outside
/// the lock.
pub struct SharedTree<L: HistoryLocator = NamedHistory> {
    tree: Arc<RwLock<NeuronTree>>,
    facade: Arc<MemoryFacade<L>>,
}

impl<L: HistoryLocator> Clone for SharedTree<L> {
    fn clone(&self) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
            facade: Arc::clone(&self.facade),
        }
    }
}

impl SharedTree<NamedHistory> {
    /// Share `tree` using the standard history nodes.
    pub fn new(tree: NeuronTree) -> Self {
        Self::with_facade(tree, MemoryFacade::new())
    }

    /// Load a .brain file and share it. Reading happens before any lock exists.
    pub fn load(path: &Path) -> NeuronResult<Self> {
        Ok(Self::new(BrainReader::read_from_file(path)?))
    }
}

impl<L: HistoryLocator> SharedTree<L> {
    /// Share `tree` with a custom facade.
    pub fn with_facade(tree: NeuronTree, facade: MemoryFacade<L>) -> Self {
        Self {
            tree: Arc::new(RwLock::new(tree)),
            facade: Arc::new(facade),
        }
    }

    /// Run `f` under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&NeuronTree) -> R) -> NeuronResult<R> {
        let guard = self.tree.read().map_err(|_| NeuronError::LockPoisoned)?;
        Ok(f(&guard))
    }

    /// Run `f` under the exclusive lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut NeuronTree) -> R) -> NeuronResult<R> {
        let mut guard = self.tree.write().map_err(|_| NeuronError::LockPoisoned)?;
        Ok(f(&mut guard))
    }

    /// Clone of the node with `id`, if present.
    pub fn get_node(&self, id: &str) -> NeuronResult<Option<NeuronNode>> {
        self.read(|tree| tree.get_node(id).cloned())
    }

    /// Append `child` under `parent_id`.
    pub fn add_child(&self, parent_id: &str, child: NeuronNode) -> NeuronResult<()> {
        self.write(|tree| tree.add_child(parent_id, child))?
    }

    /// See [`MemoryFacade::create_new_memory`].
    pub fn create_new_memory(&self, tag: MemoryTag, data: &Value) -> NeuronResult<NeuronNode> {
        self.write(|tree| self.facade.create_new_memory(tree, tag, data))?
    }

    /// See [`MemoryFacade::get_memory_by_tag`].
    pub fn get_memory_by_tag(&self, tag: MemoryTag) -> NeuronResult<Option<NeuronNode>> {
        self.read(|tree| self.facade.get_memory_by_tag(tree, tag).cloned())
    }

    /// See [`MemoryFacade::update_memory`].
    pub fn update_memory(&self, tag: MemoryTag, data: &Value) -> NeuronResult<()> {
        self.write(|tree| self.facade.update_memory(tree, tag, data))?
    }

    /// See [`MemoryFacade::read_memory`].
    pub fn read_memory(&self, tag: MemoryTag) -> NeuronResult<Value> {
        self.read(|tree| self.facade.read_memory(tree, tag))?
    }

    /// See [`MemoryFacade::add_new_chat`].
    pub fn add_new_chat(&self, data: &Value) -> NeuronResult<NeuronNode> {
        self.write(|tree| self.facade.add_new_chat(tree, data))?
    }

    /// Deep copy of the current root, taken under the shared lock.
    pub fn snapshot(&self) -> NeuronResult<NeuronNode> {
        self.read(|tree| tree.root().clone())
    }

    /// Persist a snapshot. The lock is released before the file is touched.
    pub fn save_to(&self, path: &Path, writer: &BrainWriter) -> NeuronResult<()> {
        let root = self.snapshot()?;
        writer.write_to_file(&root, path)
    }
}
