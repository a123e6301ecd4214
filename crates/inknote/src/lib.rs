//! # inknote
//!
//! Reactive formula evaluation embedded in a block-structured document.
//!
//! Users write inline expressions like `sum( b2, b4 )` that reference other
//! blocks of the document by their stable key. The engine detects such
//! expressions, resolves the referenced blocks' numeric content, computes a
//! result, and keeps a bold `= <value>` annotation on the formula block up
//! to date as the document is edited - without re-triggering itself into an
//! infinite update loop.
//!
//! ## Example
//!
//! ```rust
//! use inknote::prelude::*;
//!
//! let mut doc = Document::new();
//! let a = doc.push_paragraph("3");
//! let b = doc.push_paragraph("4");
//! let f = doc.push_formula(format!("sum( b{}, b{} )", a, b));
//!
//! doc.recalculate();
//! assert_eq!(doc.block(f).unwrap().child(1).unwrap().text(), "= 7");
//!
//! // Editing a referenced block updates the annotation
//! let a_text = doc.block(a).unwrap().first_child().unwrap().key();
//! doc.set_node_text(a_text, "10").unwrap();
//! doc.pump_mutations();
//! assert_eq!(doc.block(f).unwrap().child(1).unwrap().text(), "= 14");
//! ```

pub mod prelude;
pub mod recalc;

// Re-export recalculation types
pub use recalc::{DocumentCalculationExt, RecalcEngine, RecalcOptions, RecalcStats};

// Re-export core types
pub use inknote_core::{
    Block, BlockKind, Document, Error, InlineNode, MutationKind, NodeKey, Result, TextFormat,
    TextMutation,
};

// Re-export formula types
pub use inknote_formula::{
    evaluate, parse_formula, present, resolve_operands, Formula, Operand, PresentOutcome,
    RESULT_PREFIX,
};
