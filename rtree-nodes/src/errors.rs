//! Error and result types for node construction and reading.

use thiserror::Error;

/// Errors that can occur while building or reading R-Tree nodes.
///
/// Codec failures are never swallowed: an `encode` failure aborts leaf
/// construction as a whole, and a `decode` failure is reported for the one
/// slot it happened in. Neither is retried.
#[derive(Debug, Error)]
pub enum NodeError {
    /// A required collaborator or setting is missing or out of range.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The entry at `index` could not be encoded into a compact leaf.
    #[error("Failed to encode entry {index}: {source}")]
    Encoding {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// The slot at `index` of a compact leaf could not be decoded.
    #[error("Failed to decode entry {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// An entry or child position past the end of a node was requested.
    #[error("Index {index} out of bounds for node of {count}")]
    OutOfBounds { index: usize, count: usize },

    /// The encoded node table is structurally invalid.
    #[error("Corrupted node table: {0}")]
    Corrupted(String),
}

impl NodeError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, NodeError::Configuration(_))
    }

    pub fn is_encoding(&self) -> bool {
        matches!(self, NodeError::Encoding { .. })
    }

    /// True for decode failures and table corruption, both of which surface
    /// while reading a compact leaf.
    pub fn is_decode(&self) -> bool {
        matches!(self, NodeError::Decode { .. } | NodeError::Corrupted(_))
    }

    /// Position of the entry the failure is attributed to, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            NodeError::Encoding { index, .. }
            | NodeError::Decode { index, .. }
            | NodeError::OutOfBounds { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Result type for node operations
pub type NodeResult<T> = Result<T, NodeError>;
