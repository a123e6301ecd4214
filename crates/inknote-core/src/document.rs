//! Document type - the main tree structure
//!
//! A [`Document`] is an ordered sequence of top-level blocks with O(1) key
//! lookup and a journal of text mutations. The journal is the Rust rendition
//! of an editor's mutation-listener feed: every text-affecting change appends
//! a [`TextMutation`] record, and the host (recalculation loop, tests, CLI)
//! drains the journal with [`Document::take_mutations`]. Everything is
//! single-threaded and synchronous; a mutation is readable in the tree before
//! its journal record can be observed.

use crate::block::{Block, BlockKind};
use crate::error::{Error, Result};
use crate::inline::{InlineNode, TextFormat};
use crate::key::NodeKey;
use ahash::AHashMap;

/// How a node changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// The node was created
    Created,
    /// The node's text was updated in place
    Updated,
    /// The node was removed from the tree
    Destroyed,
}

/// A record of one text mutation
///
/// Only the changed node's key is reliable payload; consumers re-read the
/// tree for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMutation {
    /// The changed node's key
    pub node: NodeKey,
    /// What happened to it
    pub kind: MutationKind,
}

/// A block-structured document
///
/// Owns the block tree, allocates node keys (monotonic, never reused), and
/// journals every text mutation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "DocumentRepr", from = "DocumentRepr"))]
pub struct Document {
    /// Top-level blocks in document order
    blocks: Vec<Block>,
    /// Block key → position in `blocks`
    block_index: AHashMap<NodeKey, usize>,
    /// Inline node key → parent block key
    child_parent: AHashMap<NodeKey, NodeKey>,
    /// Last allocated key value
    last_key: u64,
    /// Total number of mutations applied so far
    revision: u64,
    /// Undrained mutation records
    journal: Vec<TextMutation>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            block_index: AHashMap::new(),
            child_parent: AHashMap::new(),
            last_key: 0,
            revision: 0,
            journal: Vec::new(),
        }
    }

    /// Rebuild a document from an existing block tree (deserialization path).
    ///
    /// Re-seeds the key allocator above the highest key seen so that keys
    /// allocated after a round-trip never collide with persisted ones.
    pub(crate) fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut block_index = AHashMap::new();
        let mut child_parent = AHashMap::new();
        let mut last_key = 0u64;

        for (i, block) in blocks.iter().enumerate() {
            block_index.insert(block.key(), i);
            last_key = last_key.max(block.key().as_u64());
            for child in block.children() {
                child_parent.insert(child.key(), block.key());
                last_key = last_key.max(child.key().as_u64());
            }
        }

        Self {
            blocks,
            block_index,
            child_parent,
            last_key,
            revision: 0,
            journal: Vec::new(),
        }
    }

    fn alloc_key(&mut self) -> NodeKey {
        self.last_key += 1;
        NodeKey::new(self.last_key)
    }

    fn record(&mut self, node: NodeKey, kind: MutationKind) {
        self.revision += 1;
        self.journal.push(TextMutation { node, kind });
    }

    // ==================== Reads ====================

    /// Look up a top-level block by key
    pub fn block(&self, key: NodeKey) -> Option<&Block> {
        self.block_index.get(&key).map(|&i| &self.blocks[i])
    }

    /// Iterate over all top-level blocks in document order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Number of top-level blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// The parent block key of an inline node
    pub fn parent_of(&self, node: NodeKey) -> Option<NodeKey> {
        self.child_parent.get(&node).copied()
    }

    /// The text of an inline node
    pub fn node_text(&self, node: NodeKey) -> Option<&str> {
        let parent = self.parent_of(node)?;
        let block = self.block(parent)?;
        block
            .children()
            .iter()
            .find(|c| c.key() == node)
            .map(|c| c.text())
    }

    /// Total number of mutations applied so far
    ///
    /// Increments once per text mutation, including those performed by the
    /// formula engine itself. Useful for asserting that a pass over the
    /// document did not write anything.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Mutation records not yet drained
    pub fn pending_mutations(&self) -> &[TextMutation] {
        &self.journal
    }

    // ==================== Mutations ====================

    /// Append a new empty top-level block
    pub fn push_block(&mut self, kind: BlockKind) -> NodeKey {
        let key = self.alloc_key();
        self.block_index.insert(key, self.blocks.len());
        self.blocks.push(Block::new(key, kind));
        key
    }

    /// Append a paragraph block holding a single plain text run
    pub fn push_paragraph(&mut self, text: impl Into<String>) -> NodeKey {
        let block = self.push_block(BlockKind::Paragraph);
        self.append_child_unchecked(block, text.into(), TextFormat::PLAIN);
        block
    }

    /// Append a formula block holding its raw expression text
    pub fn push_formula(&mut self, text: impl Into<String>) -> NodeKey {
        let block = self.push_block(BlockKind::Formula);
        self.append_child_unchecked(block, text.into(), TextFormat::PLAIN);
        block
    }

    /// Append an inline text run to an existing block
    pub fn append_child(
        &mut self,
        block: NodeKey,
        text: impl Into<String>,
        format: TextFormat,
    ) -> Result<NodeKey> {
        if !self.block_index.contains_key(&block) {
            return Err(Error::NodeNotFound(block));
        }
        Ok(self.append_child_unchecked(block, text.into(), format))
    }

    fn append_child_unchecked(
        &mut self,
        block: NodeKey,
        text: String,
        format: TextFormat,
    ) -> NodeKey {
        let key = self.alloc_key();
        let idx = self.block_index[&block];
        self.blocks[idx]
            .children_mut()
            .push(InlineNode::new(key, text, format));
        self.child_parent.insert(key, block);
        self.record(key, MutationKind::Created);
        key
    }

    /// Update the text of an inline node in place
    pub fn set_node_text(&mut self, node: NodeKey, text: impl Into<String>) -> Result<()> {
        let idx = self.index_of_parent(node)?;
        let child = self.blocks[idx]
            .children_mut()
            .iter_mut()
            .find(|c| c.key() == node)
            .ok_or(Error::NodeNotFound(node))?;
        child.set_text(text.into());
        self.record(node, MutationKind::Updated);
        Ok(())
    }

    /// Replace an inline node with a fresh one
    ///
    /// The replacement gets a new key; the old key is retired and never
    /// reused. Returns the new node's key.
    pub fn replace_node(
        &mut self,
        old: NodeKey,
        text: impl Into<String>,
        format: TextFormat,
    ) -> Result<NodeKey> {
        let idx = self.index_of_parent(old)?;
        let parent = self.blocks[idx].key();
        let pos = self.blocks[idx]
            .children()
            .iter()
            .position(|c| c.key() == old)
            .ok_or(Error::NodeNotFound(old))?;

        let key = self.alloc_key();
        self.blocks[idx].children_mut()[pos] = InlineNode::new(key, text.into(), format);
        self.child_parent.remove(&old);
        self.child_parent.insert(key, parent);
        self.record(old, MutationKind::Destroyed);
        self.record(key, MutationKind::Created);
        Ok(key)
    }

    /// Remove an inline node from its block
    pub fn remove_node(&mut self, node: NodeKey) -> Result<()> {
        let idx = self.index_of_parent(node)?;
        let pos = self.blocks[idx]
            .children()
            .iter()
            .position(|c| c.key() == node)
            .ok_or(Error::NodeNotFound(node))?;
        self.blocks[idx].children_mut().remove(pos);
        self.child_parent.remove(&node);
        self.record(node, MutationKind::Destroyed);
        Ok(())
    }

    /// Drain the mutation journal
    pub fn take_mutations(&mut self) -> Vec<TextMutation> {
        std::mem::take(&mut self.journal)
    }

    fn index_of_parent(&self, node: NodeKey) -> Result<usize> {
        let parent = self.parent_of(node).ok_or(Error::NodeNotFound(node))?;
        self.block_index
            .get(&parent)
            .copied()
            .ok_or(Error::NodeNotFound(parent))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized form: just the block tree. Indexes, the key allocator and the
/// journal are rebuilt on load.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct DocumentRepr {
    blocks: Vec<Block>,
}

#[cfg(feature = "serde")]
impl From<Document> for DocumentRepr {
    fn from(doc: Document) -> Self {
        DocumentRepr { blocks: doc.blocks }
    }
}

#[cfg(feature = "serde")]
impl From<DocumentRepr> for Document {
    fn from(repr: DocumentRepr) -> Self {
        Document::from_blocks(repr.blocks)
    }
}
