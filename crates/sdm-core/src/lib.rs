//! # sdm-core
//!
//! Sparse distributed memory engine.
//!
//! A [`MemoryStore`] owns a fixed table of random hard-location addresses
//! and a matrix of signed per-bit counters. A write raises or lowers the
//! counters of every location within the activation radius of the target
//! address; a read tallies the counters of activated locations in parallel
//! and re-probes with the majority vote until the output stabilizes.
//!
//! The engine is purely in-process and volatile: no persistence, no
//! resizing, no distribution.

pub mod config;
pub mod error;
pub mod history;
pub mod reader;
pub mod store;

pub use config::*;
pub use error::*;
pub use history::*;
pub use reader::*;
pub use store::*;
