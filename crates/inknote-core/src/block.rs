//! Block types - top-level structural units of a document

use crate::inline::InlineNode;
use crate::key::NodeKey;

/// The kind of a top-level block
///
/// A closed set: the formula engine only ever asks "is this a formula
/// block"; everything else is opaque content that formulas may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BlockKind {
    /// A formula block: raw expression text plus an optional result annotation
    Formula,
    /// Plain paragraph content
    Paragraph,
}

/// A top-level block of the document
///
/// Blocks are addressable by a stable [`NodeKey`] and hold an ordered
/// sequence of inline text runs. A formula block persists with no payload
/// beyond its kind tag; its children are serialized like any other block's.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    key: NodeKey,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    kind: BlockKind,
    children: Vec<InlineNode>,
}

impl Block {
    pub(crate) fn new(key: NodeKey, kind: BlockKind) -> Self {
        Self {
            key,
            kind,
            children: Vec::new(),
        }
    }

    /// The block's stable key
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// The block's kind
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Whether this is a formula block
    pub fn is_formula(&self) -> bool {
        self.kind == BlockKind::Formula
    }

    /// The block's inline children, in order
    pub fn children(&self) -> &[InlineNode] {
        &self.children
    }

    /// The inline child at the given position
    pub fn child(&self, index: usize) -> Option<&InlineNode> {
        self.children.get(index)
    }

    /// The first inline child (a formula block's raw expression text)
    pub fn first_child(&self) -> Option<&InlineNode> {
        self.children.first()
    }

    /// The full text content of the block: all inline runs concatenated
    pub fn text_content(&self) -> String {
        self.children.iter().map(|c| c.text()).collect()
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<InlineNode> {
        &mut self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::TextFormat;

    #[test]
    fn test_text_content_concatenates_children() {
        let mut block = Block::new(NodeKey::new(1), BlockKind::Formula);
        block.children_mut().push(InlineNode::new(
            NodeKey::new(2),
            "sum( b9 )".into(),
            TextFormat::PLAIN,
        ));
        block.children_mut().push(InlineNode::new(
            NodeKey::new(3),
            "= 7".into(),
            TextFormat::BOLD,
        ));

        assert_eq!(block.text_content(), "sum( b9 )= 7");
        assert!(block.is_formula());
        assert_eq!(block.child(1).unwrap().text(), "= 7");
        assert!(block.child(1).unwrap().is_bold());
    }
}
