//! Core definitions (error taxonomy, result alias and verification helpers),
//! relied upon by all seqvec-* crates.

pub mod error;
pub mod result;

pub use result::Result;
