//! Error types for binary vector operations.

use thiserror::Error;

/// Errors that can occur when constructing or combining binary vectors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitVecError {
    #[error("Vector length mismatch: expected {expected} bits, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid bit character {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },

    #[error("Vector length must be positive")]
    EmptyVector,
}
