//! Test utilities and helpers for the seqvec crates.
//!
//! This crate provides:
//! - Instrumented element types that count constructions, clones and drops
//! - Deterministic generators of random container operation sequences
//!
//! It is meant to be used as a dev-dependency only.

pub mod lifecycle;
pub mod ops;
