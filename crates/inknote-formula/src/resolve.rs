//! Operand resolution
//!
//! Turns the key strings written in a formula into numbers by reading the
//! referenced blocks' current text. Absence is a normal value here, never an
//! error: a dangling reference, a missing block, or text that does not parse
//! as a number all resolve to an absent operand, which the evaluator skips.

use inknote_core::{Document, NodeKey};

/// One resolved operand: the key string as written, and its numeric value if
/// it could be resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    /// The operand's key string, as written in the formula
    pub key: String,
    /// The referenced block's numeric value, or `None` if absent
    pub value: Option<f64>,
}

/// Resolve operand key strings against the document, preserving order.
pub fn resolve_operands(doc: &Document, refs: &[String]) -> Vec<Operand> {
    refs.iter()
        .map(|key| Operand {
            key: key.clone(),
            value: resolve_one(doc, key),
        })
        .collect()
}

fn resolve_one(doc: &Document, key: &str) -> Option<f64> {
    let key: NodeKey = key.parse().ok()?;
    let block = doc.block(key)?;
    coerce_number(&block.text_content())
}

/// Standard decimal parse of a block's text: negatives, decimals and
/// exponents are accepted; NaN and non-numeric text are not.
fn coerce_number(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    (!value.is_nan()).then_some(value)
}
