//! Score board: running total plus a max-heap of per-pair scores.

use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// Tracks every matched pair's score.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pairs: BinaryHeap<u64>,
    total: u64,
}

impl ScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one matched pair.
    pub fn add_match(&mut self, score: u64) {
        self.pairs.push(score);
        self.total += score;
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of pairs recorded.
    #[must_use]
    pub fn matches(&self) -> usize {
        self.pairs.len()
    }

    /// Best single pair so far, 0 if none.
    #[must_use]
    pub fn highest_pair(&self) -> u64 {
        self.pairs.peek().copied().unwrap_or(0)
    }

    /// All pair scores, highest first.
    #[must_use]
    pub fn history(&self) -> Vec<u64> {
        let mut history = self.pairs.clone().into_sorted_vec();
        history.reverse();
        history
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
        self.total = 0;
    }
}
