//! End-to-end recalculation behavior driven through the mutation journal

use inknote::prelude::*;
use pretty_assertions::assert_eq;

/// The annotation text of a formula block, if any
fn annotation(doc: &Document, block: NodeKey) -> Option<String> {
    doc.block(block)
        .unwrap()
        .child(1)
        .map(|n| n.text().to_string())
}

/// The key of a block's first (raw text) child
fn text_key(doc: &Document, block: NodeKey) -> NodeKey {
    doc.block(block).unwrap().first_child().unwrap().key()
}

#[test]
fn test_sum_annotation_created_from_edits() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("3");
    let b = doc.push_paragraph("4");
    let f = doc.push_formula(format!("sum( b{a}, b{b} )"));

    // Setup itself is a stream of text mutations; pumping them is what
    // activates the formula.
    let stats = doc.pump_mutations();
    assert!(stats.created >= 1);
    assert_eq!(annotation(&doc, f), Some("= 7".to_string()));
    assert!(doc.block(f).unwrap().child(1).unwrap().is_bold());
}

#[test]
fn test_recompute_on_dependency_change() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("3");
    let b = doc.push_paragraph("4");
    let f = doc.push_formula(format!("sum( b{a}, b{b} )"));
    doc.pump_mutations();
    assert_eq!(annotation(&doc, f), Some("= 7".to_string()));

    doc.set_node_text(text_key(&doc, a), "10").unwrap();
    doc.pump_mutations();
    assert_eq!(annotation(&doc, f), Some("= 14".to_string()));
}

#[test]
fn test_second_pass_is_idempotent() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("3");
    let b = doc.push_paragraph("4");
    doc.push_formula(format!("sum( b{a}, b{b} )"));
    doc.pump_mutations();

    let revision = doc.revision();
    let stats = doc.recalculate();
    assert!(!stats.wrote_anything());
    assert_eq!(doc.revision(), revision);
    assert!(doc.pending_mutations().is_empty());
}

#[test]
fn test_absent_operand_is_skipped() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("5");
    let f = doc.push_formula(format!("sum( b{a}, b99 )"));
    doc.pump_mutations();

    // Not NaN, not 0-for-missing: just 5
    assert_eq!(annotation(&doc, f), Some("= 5".to_string()));
}

#[test]
fn test_identity_values_for_empty_operand_lists() {
    let mut doc = Document::new();
    let s = doc.push_formula("sum()");
    let m = doc.push_formula("multiply()");
    doc.pump_mutations();

    assert_eq!(annotation(&doc, s), Some("= 0".to_string()));
    assert_eq!(annotation(&doc, m), Some("= 1".to_string()));
}

#[test]
fn test_non_numeric_operand_is_skipped() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("abc");
    let b = doc.push_paragraph("4");
    let f = doc.push_formula(format!("sum( b{a}, b{b} )"));
    doc.pump_mutations();

    assert_eq!(annotation(&doc, f), Some("= 4".to_string()));
}

#[test]
fn test_unrelated_edit_leaves_annotation_node_untouched() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("3");
    let b = doc.push_paragraph("4");
    let unrelated = doc.push_paragraph("hello");
    let f = doc.push_formula(format!("sum( b{a}, b{b} )"));
    doc.pump_mutations();

    let annotation_key = doc.block(f).unwrap().child(1).unwrap().key();
    let revision = doc.revision();

    doc.set_node_text(text_key(&doc, unrelated), "world").unwrap();
    let stats = doc.pump_mutations();

    // The formula was re-checked but nothing was written: same node, and
    // the only mutation on record is the edit itself.
    assert!(stats.unchanged >= 1);
    assert!(!stats.wrote_anything());
    assert_eq!(doc.block(f).unwrap().child(1).unwrap().key(), annotation_key);
    assert_eq!(doc.revision(), revision + 1);
}

#[test]
fn test_malformed_formula_is_inert() {
    let mut doc = Document::new();
    doc.push_paragraph("3");
    let f = doc.push_formula("sum(b1, b2");
    let stats = doc.pump_mutations();

    assert!(stats.inert_blocks >= 1);
    assert_eq!(annotation(&doc, f), None);
}

#[test]
fn test_formula_activates_once_text_becomes_well_formed() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("6");
    let f = doc.push_formula(format!("sum( b{a}"));
    doc.pump_mutations();
    assert_eq!(annotation(&doc, f), None);

    // Close the paren: the edit is inside the formula block (case A)
    doc.set_node_text(text_key(&doc, f), format!("sum( b{a} )"))
        .unwrap();
    doc.pump_mutations();
    assert_eq!(annotation(&doc, f), Some("= 6".to_string()));
}

#[test]
fn test_broken_formula_keeps_stale_annotation() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("3");
    let b = doc.push_paragraph("4");
    let f = doc.push_formula(format!("sum( b{a}, b{b} )"));
    doc.pump_mutations();
    assert_eq!(annotation(&doc, f), Some("= 7".to_string()));

    doc.set_node_text(text_key(&doc, f), "sum(").unwrap();
    doc.pump_mutations();
    // No cleanup: the last good value stays visible
    assert_eq!(annotation(&doc, f), Some("= 7".to_string()));
}

#[test]
fn test_unrecognized_operator_falls_through_to_multiply() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("3");
    let b = doc.push_paragraph("4");
    let f = doc.push_formula(format!("frobnicate( b{a}, b{b} )"));
    doc.pump_mutations();

    assert_eq!(annotation(&doc, f), Some("= 12".to_string()));
}

#[test]
fn test_annotation_is_not_operand_text_for_other_formulas() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("3");
    let f1 = doc.push_formula(format!("sum( b{a} )"));
    let f2 = doc.push_formula(format!("sum( b{f1} )"));
    doc.pump_mutations();

    assert_eq!(annotation(&doc, f1), Some("= 3".to_string()));
    // f1's full text is "sum( b.. )= 3", which does not coerce to a number,
    // so f2 sees an absent operand rather than f1's result.
    assert_eq!(annotation(&doc, f2), Some("= 0".to_string()));
}

#[test]
fn test_replacement_keeps_annotation_position() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("2");
    let f = doc.push_formula(format!("multiply( b{a}, b{a} )"));
    doc.pump_mutations();
    assert_eq!(annotation(&doc, f), Some("= 4".to_string()));

    doc.set_node_text(text_key(&doc, a), "3").unwrap();
    doc.pump_mutations();

    let block = doc.block(f).unwrap();
    assert_eq!(block.children().len(), 2);
    assert_eq!(block.child(1).unwrap().text(), "= 9");
    assert!(block.child(1).unwrap().is_bold());
}

#[test]
fn test_multiple_formulas_track_one_dependency() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("2");
    let sum = doc.push_formula(format!("sum( b{a}, b{a} )"));
    let product = doc.push_formula(format!("multiply( b{a}, b{a} )"));
    doc.pump_mutations();

    doc.set_node_text(text_key(&doc, a), "5").unwrap();
    doc.pump_mutations();

    assert_eq!(annotation(&doc, sum), Some("= 10".to_string()));
    assert_eq!(annotation(&doc, product), Some("= 25".to_string()));
}

#[test]
fn test_decimal_result_formatting() {
    let mut doc = Document::new();
    let a = doc.push_paragraph("2.5");
    let b = doc.push_paragraph("-1");
    let f = doc.push_formula(format!("sum( b{a}, b{b} )"));
    doc.pump_mutations();

    assert_eq!(annotation(&doc, f), Some("= 1.5".to_string()));
}
