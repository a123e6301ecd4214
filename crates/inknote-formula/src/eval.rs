//! Operator evaluation
//!
//! Reduces resolved operands to a single number. Absent operands are skipped
//! entirely - they contribute neither zero nor one - so `sum(b1, b99)` with
//! a dangling `b99` is just the value of `b1`.

use crate::resolve::Operand;

/// Evaluate an operator token over resolved operands.
///
/// `"sum"` (case-sensitive) folds addition from a seed of `0`. Every other
/// token, including `"multiply"`, folds multiplication from a seed of `1` -
/// the unrecognized-operator fallthrough matches the behavior this engine
/// replaces and is kept observable-compatible rather than rejected. Zero
/// present operands yield the seed.
pub fn evaluate(op: &str, operands: &[Operand]) -> f64 {
    let present = operands.iter().filter_map(|o| o.value);
    match op {
        "sum" => present.fold(0.0, |acc, v| acc + v),
        other => {
            if other != "multiply" {
                log::debug!("unrecognized operator {other:?}, treated as multiply");
            }
            present.fold(1.0, |acc, v| acc * v)
        }
    }
}
