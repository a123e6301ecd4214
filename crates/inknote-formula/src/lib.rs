//! # inknote-formula
//!
//! Formula parsing and evaluation for inknote documents.
//!
//! This crate provides:
//! - Formula parsing (raw block text → [`Formula`])
//! - Operand resolution (referenced block → number, or absent)
//! - Evaluation (sum/multiply reduction over present operands)
//! - Result presentation (idempotent upsert of the `= <value>` annotation)
//!
//! ## Example
//!
//! ```rust
//! use inknote_core::Document;
//! use inknote_formula::{evaluate, parse_formula, resolve_operands};
//!
//! let mut doc = Document::new();
//! let a = doc.push_paragraph("3");
//! let b = doc.push_paragraph("4");
//!
//! let formula = parse_formula(&format!("sum( b{}, b{} )", a, b)).unwrap();
//! let operands = resolve_operands(&doc, &formula.operand_refs);
//! assert_eq!(evaluate(&formula.op, &operands), 7.0);
//! ```

pub mod eval;
pub mod parse;
pub mod present;
pub mod resolve;

pub use eval::evaluate;
pub use parse::{parse_formula, Formula};
pub use present::{present, PresentOutcome, RESULT_PREFIX};
pub use resolve::{resolve_operands, Operand};
