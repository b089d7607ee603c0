//! # sdm-bitvec
//!
//! Word-packed binary vectors for sparse distributed memory.
//!
//! Features:
//! - Runtime-sized vectors packed into u64 words
//! - Hamming distance via XOR + POPCNT
//! - Uniform random generation from any `rand::Rng`
//! - `'0'`/`'1'` textual form for display, parsing and serde

pub mod error;
pub mod vector;

pub use error::*;
pub use vector::*;
