//! Result presentation
//!
//! Upserts the bold `= <value>` annotation that follows a formula block's
//! raw text. The compare-before-write here is load-bearing: the annotation
//! write re-enters the same mutation feed that drives recalculation, and
//! only the no-mutation-when-equal rule keeps that loop from running
//! forever.

use inknote_core::{Document, Error, NodeKey, Result, TextFormat};

/// Prefix of every result annotation
pub const RESULT_PREFIX: &str = "= ";

/// What [`present`] did to the annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    /// No annotation existed; a new bold text node was appended
    Created,
    /// The annotation existed with a different value and was replaced
    Replaced,
    /// The annotation already showed this value; nothing was written
    Unchanged,
}

/// Create, replace, or leave alone the result annotation of a formula block.
///
/// The annotation is the block's second inline child. Its previous value is
/// read back from the text after the `"= "` prefix; if it equals the new
/// result, no mutation happens at all. A malformed annotation (text that
/// does not parse back) never equals the new result and gets replaced.
///
/// Fails only if the block itself cannot be found - a host-contract
/// violation, which callers downgrade to a logged no-op.
pub fn present(doc: &mut Document, block: NodeKey, result: f64) -> Result<PresentOutcome> {
    let existing = doc
        .block(block)
        .ok_or(Error::NodeNotFound(block))?
        .child(1)
        .map(|node| (node.key(), previous_result(node.text())));

    match existing {
        None => {
            doc.append_child(block, annotation_text(result), TextFormat::BOLD)?;
            Ok(PresentOutcome::Created)
        }
        Some((_, Some(prev))) if prev == result => Ok(PresentOutcome::Unchanged),
        Some((key, _)) => {
            doc.replace_node(key, annotation_text(result), TextFormat::BOLD)?;
            Ok(PresentOutcome::Replaced)
        }
    }
}

fn annotation_text(result: f64) -> String {
    format!("{RESULT_PREFIX}{result}")
}

fn previous_result(text: &str) -> Option<f64> {
    text.strip_prefix(RESULT_PREFIX)?.parse().ok()
}
