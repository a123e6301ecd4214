//! Inline text nodes

use crate::key::NodeKey;

/// Character formatting for an inline text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextFormat {
    /// Bold emphasis (result annotations are always bold)
    pub bold: bool,
}

impl TextFormat {
    /// Unformatted text
    pub const PLAIN: TextFormat = TextFormat { bold: false };

    /// Bold text
    pub const BOLD: TextFormat = TextFormat { bold: true };
}

/// An inline text run inside a block
///
/// Inline nodes carry the actual text content of the document. A formula
/// block holds its raw expression in its first inline child and its result
/// annotation (if any) in the second.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InlineNode {
    key: NodeKey,
    text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    format: TextFormat,
}

impl InlineNode {
    pub(crate) fn new(key: NodeKey, text: String, format: TextFormat) -> Self {
        Self { key, text, format }
    }

    /// The node's stable key
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// The text content of this run
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The character formatting of this run
    pub fn format(&self) -> TextFormat {
        self.format
    }

    /// Whether this run is bold
    pub fn is_bold(&self) -> bool {
        self.format.bold
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}
