//! Node keys - stable identifiers for document nodes

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Opaque, stable identifier for a document node.
///
/// Blocks and inline nodes share one key space. Keys are allocated by the
/// [`Document`](crate::Document) from a monotonic counter, stay stable across
/// edits, and are never reused. Formula text references a block by the
/// decimal form of its key (`b2` refers to the block with key `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeKey(u64);

impl NodeKey {
    pub(crate) fn new(raw: u64) -> Self {
        NodeKey(raw)
    }

    /// The raw numeric value of the key
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(NodeKey)
            .map_err(|_| Error::InvalidKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrip() {
        let key = NodeKey::new(42);
        assert_eq!(key.to_string(), "42");
        assert_eq!("42".parse::<NodeKey>().unwrap(), key);
    }

    #[test]
    fn test_invalid_key() {
        assert!("".parse::<NodeKey>().is_err());
        assert!("abc".parse::<NodeKey>().is_err());
        assert!("-1".parse::<NodeKey>().is_err());
    }
}
