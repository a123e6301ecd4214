//! Formula syntax parser
//!
//! Recognizes the grammar `<operator>(<operand>[, <operand>]*)` where each
//! operand is `b<key>` with optional surrounding whitespace. Text that does
//! not match yields no formula at all; the block is inert until its text
//! becomes well-formed.

/// A parsed formula: an operator token and the referenced block keys
///
/// The operator token is kept verbatim, including tokens that are neither
/// `sum` nor `multiply` - the evaluator decides what an unrecognized token
/// means. Operand key strings are not validated against the document here;
/// resolution turns dangling references into absent operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    /// The operator token, verbatim (text before the first `(`)
    pub op: String,
    /// Referenced block keys in written order, `b` prefix stripped
    pub operand_refs: Vec<String>,
}

/// Parse a block's raw text into a [`Formula`], or `None` if it does not
/// match the grammar.
///
/// # Example
/// ```rust
/// use inknote_formula::parse_formula;
///
/// let f = parse_formula("sum( b2, b4 )").unwrap();
/// assert_eq!(f.op, "sum");
/// assert_eq!(f.operand_refs, vec!["2", "4"]);
///
/// assert!(parse_formula("sum(b2, b4").is_none()); // no closing paren
/// ```
pub fn parse_formula(raw: &str) -> Option<Formula> {
    let (op, rest) = raw.split_once('(')?;
    let (args, _) = rest.split_once(')')?;

    let operand_refs = if args.trim().is_empty() {
        Vec::new()
    } else {
        args.split(',')
            .map(|piece| {
                let piece = piece.trim();
                piece.strip_prefix('b').unwrap_or(piece).to_string()
            })
            .collect()
    };

    Some(Formula {
        op: op.to_string(),
        operand_refs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_basic() {
        let f = parse_formula("sum(b2,b4)").unwrap();
        assert_eq!(f.op, "sum");
        assert_eq!(f.operand_refs, vec!["2", "4"]);
    }

    #[test]
    fn test_whitespace_insensitive_operands() {
        let spaced = parse_formula("sum( b2, b4 )").unwrap();
        let tight = parse_formula("sum(b2,b4)").unwrap();
        assert_eq!(spaced.operand_refs, tight.operand_refs);
    }

    #[test]
    fn test_missing_close_paren_is_not_a_formula() {
        assert!(parse_formula("sum(b2, b4").is_none());
        assert!(parse_formula("sum b2, b4").is_none());
        assert!(parse_formula("").is_none());
        assert!(parse_formula("just some text").is_none());
    }

    #[test]
    fn test_text_after_close_paren_is_ignored() {
        // A formula block's own annotation follows the raw text
        let f = parse_formula("sum( b2, b4 )= 7").unwrap();
        assert_eq!(f.operand_refs, vec!["2", "4"]);
    }

    #[test]
    fn test_zero_operands() {
        let f = parse_formula("multiply()").unwrap();
        assert_eq!(f.op, "multiply");
        assert!(f.operand_refs.is_empty());

        let f = parse_formula("sum(  )").unwrap();
        assert!(f.operand_refs.is_empty());
    }

    #[test]
    fn test_operator_token_kept_verbatim() {
        // Case-sensitive and untrimmed: these are not "sum"
        assert_eq!(parse_formula("SUM(b1)").unwrap().op, "SUM");
        assert_eq!(parse_formula("sum (b1)").unwrap().op, "sum ");
        assert_eq!(parse_formula("frobnicate(b1)").unwrap().op, "frobnicate");
    }

    #[test]
    fn test_operand_without_b_prefix_kept_as_is() {
        let f = parse_formula("sum(2, b4)").unwrap();
        assert_eq!(f.operand_refs, vec!["2", "4"]);
    }
}
