//! Error types for the memory engine.

use sdm_bitvec::BitVecError;
use thiserror::Error;

/// Errors that can occur when constructing or operating a memory store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Invalid memory geometry: {0}")]
    InvalidConfig(String),

    #[error("Vector width mismatch: expected {expected} bits, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("Vector error: {0}")]
    Vector(#[from] BitVecError),
}
