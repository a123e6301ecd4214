//! # inknote-core
//!
//! Core data structures for the inknote block-structured document.
//!
//! This crate provides the fundamental types used throughout inknote:
//! - [`NodeKey`] - Stable, opaque identifier for every node
//! - [`InlineNode`] and [`TextFormat`] - Inline text runs
//! - [`Block`] and [`BlockKind`] - Top-level document blocks
//! - [`Document`] - The document tree, with key lookup and a mutation journal
//!
//! ## Example
//!
//! ```rust
//! use inknote_core::Document;
//!
//! let mut doc = Document::new();
//! let price = doc.push_paragraph("12.5");
//! let formula = doc.push_formula(format!("sum( b{} )", price));
//!
//! assert!(doc.block(formula).unwrap().is_formula());
//! assert_eq!(doc.block(price).unwrap().text_content(), "12.5");
//! ```

pub mod block;
pub mod document;
pub mod error;
pub mod inline;
pub mod key;

// Re-exports for convenience
pub use block::{Block, BlockKind};
pub use document::{Document, MutationKind, TextMutation};
pub use error::{Error, Result};
pub use inline::{InlineNode, TextFormat};
pub use key::NodeKey;
