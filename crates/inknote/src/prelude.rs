//! Convenient re-exports for typical usage
//!
//! ```rust
//! use inknote::prelude::*;
//! ```

pub use crate::recalc::{DocumentCalculationExt, RecalcEngine, RecalcOptions, RecalcStats};
pub use inknote_core::{
    Block, BlockKind, Document, InlineNode, MutationKind, NodeKey, TextFormat, TextMutation,
};
pub use inknote_formula::{parse_formula, Formula, PresentOutcome};
