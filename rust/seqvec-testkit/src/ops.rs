//! Random operation sequences for model-based container tests.
//!
//! The generator does not track the container length, so generated indices may
//! be out of range. Tests are expected to apply each operation both to the
//! container under test and to a reference model and compare the outcomes,
//! including errors.

/// A single container operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    PushBack(u32),
    PopBack,
    InsertAt { index: usize, value: u32 },
    RemoveAt { index: usize },
    Set { index: usize, value: u32 },
    Get { index: usize },
    First,
    Last,
    Clear,
    /// Replace the container with a copy of itself.
    Reassign,
}

/// Parameters of an operation sequence.
#[derive(Debug, Clone)]
pub struct OpsParams {
    pub seed: u64,
    pub count: usize,
    /// Exclusive upper bound for generated indices.
    pub max_index: usize,
}

impl Default for OpsParams {
    fn default() -> Self {
        OpsParams {
            seed: 1897346723,
            count: 10_000,
            max_index: 64,
        }
    }
}

/// Generates a deterministic operation sequence.
///
/// Appends and inserts are weighted above removals so that containers grow
/// through several reallocations over a long sequence; `Clear` is rare.
pub fn generate_ops(params: &OpsParams) -> Vec<Op> {
    let mut rng = fastrand::Rng::with_seed(params.seed);
    let max_index = params.max_index.max(1);
    (0..params.count)
        .map(|_| match rng.u32(0..100) {
            0..30 => Op::PushBack(rng.u32(..)),
            30..45 => Op::InsertAt {
                index: rng.usize(0..max_index),
                value: rng.u32(..),
            },
            45..60 => Op::RemoveAt {
                index: rng.usize(0..max_index),
            },
            60..70 => Op::PopBack,
            70..80 => Op::Set {
                index: rng.usize(0..max_index),
                value: rng.u32(..),
            },
            80..90 => Op::Get {
                index: rng.usize(0..max_index),
            },
            90..94 => Op::First,
            94..98 => Op::Last,
            98 => Op::Reassign,
            _ => Op::Clear,
        })
        .collect()
}
