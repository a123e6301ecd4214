//! Recalculation trigger
//!
//! Decides, for every text mutation in the document, which formula block(s)
//! to re-evaluate, and pumps the mutation journal until the document
//! settles.
//!
//! An edit inside a formula block re-evaluates just that block; an edit
//! anywhere else re-evaluates every formula block in document order (a full
//! re-scan, not a dependency-indexed push). Annotation writes performed
//! while handling one mutation land back in the same journal and are handled
//! on the next pass; the presenter's compare-before-write is the sole
//! termination guarantee. Two formula blocks that reference each other's
//! results and never stabilize would pump forever - that risk is left
//! unguarded on purpose, since documents that happen to stabilize today
//! must keep doing so.
//!
//! # Example
//!
//! ```rust
//! use inknote::prelude::*;
//!
//! let mut doc = Document::new();
//! let price = doc.push_paragraph("12.5");
//! let count = doc.push_paragraph("4");
//! let total = doc.push_formula(format!("multiply( b{price}, b{count} )"));
//!
//! let stats = doc.recalculate();
//! assert_eq!(stats.created, 1);
//! assert_eq!(doc.block(total).unwrap().child(1).unwrap().text(), "= 50");
//! ```

use inknote_core::{Document, NodeKey};
use inknote_formula::{evaluate, parse_formula, present, resolve_operands, PresentOutcome};

/// Options for the recalculation engine
#[derive(Debug, Clone, Default)]
pub struct RecalcOptions {
    /// Upper bound on pump passes before giving up.
    ///
    /// `None` (the default) preserves the unbounded behavior: a document
    /// whose formula values never stabilize keeps recomputing. Hosts that
    /// would rather drop updates than hang can set a bound.
    pub max_passes: Option<u32>,
}

/// Statistics from a recalculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecalcStats {
    /// Formula blocks visited (including repeat visits across passes)
    pub formulas_visited: usize,
    /// Visits where the block's text did not parse as a formula
    pub inert_blocks: usize,
    /// Annotations created
    pub created: usize,
    /// Annotations replaced with a new value
    pub replaced: usize,
    /// Visits that left the annotation untouched
    pub unchanged: usize,
    /// Mutation notifications ignored because no parent block resolved
    pub skipped_mutations: usize,
    /// Journal drain passes performed
    pub passes: u32,
}

impl RecalcStats {
    /// Whether any annotation was actually written
    pub fn wrote_anything(&self) -> bool {
        self.created > 0 || self.replaced > 0
    }

    fn absorb(&mut self, other: RecalcStats) {
        self.formulas_visited += other.formulas_visited;
        self.inert_blocks += other.inert_blocks;
        self.created += other.created;
        self.replaced += other.replaced;
        self.unchanged += other.unchanged;
        self.skipped_mutations += other.skipped_mutations;
        self.passes += other.passes;
    }
}

/// The recalculation engine
///
/// Stateless beyond its options: each notification is handled independently
/// and synchronously, and the document tree itself is the only shared state.
#[derive(Debug, Clone, Default)]
pub struct RecalcEngine {
    options: RecalcOptions,
}

impl RecalcEngine {
    /// Create an engine with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom options
    pub fn with_options(options: RecalcOptions) -> Self {
        Self { options }
    }

    /// Handle one text-mutation notification.
    ///
    /// This is the host entry point. If the changed node sits inside a
    /// formula block, only that block is re-evaluated; otherwise every
    /// formula block in the document is. A notification whose node has no
    /// resolvable parent (e.g. the node was destroyed) is a no-op.
    pub fn on_text_mutated(&self, doc: &mut Document, changed: NodeKey) -> RecalcStats {
        let mut stats = RecalcStats::default();

        let Some(parent) = doc.parent_of(changed) else {
            log::debug!("mutation for node {changed} has no resolvable parent, ignoring");
            stats.skipped_mutations += 1;
            return stats;
        };

        let parent_is_formula = doc.block(parent).map(|b| b.is_formula()).unwrap_or(false);
        if parent_is_formula {
            // Case A: the formula's own text changed
            self.recalc_block(doc, parent, &mut stats);
        } else {
            // Case B: something a formula might reference changed
            for key in formula_block_keys(doc) {
                self.recalc_block(doc, key, &mut stats);
            }
        }

        stats
    }

    /// Drain the document's mutation journal until it stays empty.
    ///
    /// Annotation writes made while handling one batch re-enter the journal
    /// and are handled in the next pass, mirroring a host that folds engine
    /// writes into the following update cycle.
    pub fn process(&self, doc: &mut Document) -> RecalcStats {
        let mut stats = RecalcStats::default();

        loop {
            let pending = doc.take_mutations();
            if pending.is_empty() {
                break;
            }
            stats.passes += 1;
            if let Some(max) = self.options.max_passes {
                if stats.passes > max {
                    log::warn!("recalculation did not settle after {max} passes, giving up");
                    break;
                }
            }
            for mutation in pending {
                let pass = self.on_text_mutated(doc, mutation.node);
                stats.absorb(pass);
            }
        }

        stats
    }

    /// Re-evaluate every formula block, then settle re-entrant writes.
    ///
    /// Use this for a document that was just loaded (its journal is empty,
    /// so nothing would otherwise trigger).
    pub fn recalculate_all(&self, doc: &mut Document) -> RecalcStats {
        let mut stats = RecalcStats::default();
        for key in formula_block_keys(doc) {
            self.recalc_block(doc, key, &mut stats);
        }
        let settled = self.process(doc);
        stats.absorb(settled);
        stats
    }

    /// Parse → resolve → evaluate → present for one formula block
    fn recalc_block(&self, doc: &mut Document, block: NodeKey, stats: &mut RecalcStats) {
        stats.formulas_visited += 1;

        let raw = doc
            .block(block)
            .and_then(|b| b.first_child())
            .map(|c| c.text().to_string());
        let Some(formula) = raw.as_deref().and_then(parse_formula) else {
            // Not (yet) a formula; leave any existing annotation stale
            stats.inert_blocks += 1;
            return;
        };

        let operands = resolve_operands(doc, &formula.operand_refs);
        let result = evaluate(&formula.op, &operands);

        match present(doc, block, result) {
            Ok(PresentOutcome::Created) => stats.created += 1,
            Ok(PresentOutcome::Replaced) => stats.replaced += 1,
            Ok(PresentOutcome::Unchanged) => stats.unchanged += 1,
            Err(e) => log::warn!("failed to write result for block {block}: {e}"),
        }
    }
}

fn formula_block_keys(doc: &Document) -> Vec<NodeKey> {
    doc.blocks()
        .filter(|b| b.is_formula())
        .map(|b| b.key())
        .collect()
}

/// Extension trait for [`Document`] to add recalculation methods
pub trait DocumentCalculationExt {
    /// Re-evaluate every formula block with a default engine
    fn recalculate(&mut self) -> RecalcStats;

    /// Drain pending text mutations through the recalculation trigger
    fn pump_mutations(&mut self) -> RecalcStats;
}

impl DocumentCalculationExt for Document {
    fn recalculate(&mut self) -> RecalcStats {
        RecalcEngine::new().recalculate_all(self)
    }

    fn pump_mutations(&mut self) -> RecalcStats {
        RecalcEngine::new().process(self)
    }
}
