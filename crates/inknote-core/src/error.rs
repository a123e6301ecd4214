//! Error types for inknote-core

use crate::key::NodeKey;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in inknote-core
#[derive(Debug, Error)]
pub enum Error {
    /// No node with the given key exists in the document
    #[error("Node not found: {0}")]
    NodeNotFound(NodeKey),

    /// A key string did not parse as a node key
    #[error("Invalid node key: {0:?}")]
    InvalidKey(String),
}
