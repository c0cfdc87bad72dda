//! Error types for meshlod

use thiserror::Error;

/// Main error type for meshlod operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("{attribute} array has {len} entries, expected 0 or {expected}")]
    AttributeLength {
        attribute: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("vertex index {index} does not fit in a 32-bit index buffer")]
    IndexOverflow { index: usize },

    #[error("index array length {len} is not a multiple of 3")]
    MalformedIndices { len: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("operation was cancelled")]
    Cancelled,
}

/// Result type alias for meshlod operations
pub type Result<T> = std::result::Result<T, Error>;
