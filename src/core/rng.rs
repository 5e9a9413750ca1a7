//! Deterministic random number generation for board layouts and reshuffles.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical layouts
//! - **Unbiased**: Fisher–Yates shuffle, every permutation equally likely
//! - **Subset shuffles**: Permute only selected slots (anti-stall reshuffle)
//! - **Context streams**: Independent sequences for different purposes
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use memory_maze::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut deck = vec!['A', 'A', 'B', 'B'];
//! rng.shuffle(&mut deck);
//!
//! // Same seed, same layout
//! let mut again = vec!['A', 'A', 'B', 'B'];
//! GameRng::new(42).shuffle(&mut again);
//! assert_eq!(deck, again);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic RNG used by board construction and the anti-stall reshuffle.
///
/// Uses ChaCha8 for speed while maintaining good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// The drawn seed is kept so the session can still be checkpointed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// Separates randomness domains (layout vs reshuffle vs item effects) so
    /// that using an item never changes what a later reshuffle produces.
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self::new(context_seed)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    ///
    /// Fisher–Yates: walk from the last slot down to index 1, swapping each
    /// slot with a uniformly drawn slot in `0..=i`.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.inner.gen_range(0..=i);
            slice.swap(i, j);
        }
    }

    /// Shuffle only the slots named by `indices`, leaving every other slot
    /// untouched.
    ///
    /// The values at `indices` are permuted among themselves with the same
    /// unbiased shuffle as [`GameRng::shuffle`]. Indices out of range are
    /// ignored.
    pub fn shuffle_subset<T>(&mut self, slice: &mut [T], indices: &[usize]) {
        let slots: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < slice.len())
            .collect();

        for k in (1..slots.len()).rev() {
            let j = self.inner.gen_range(0..=k);
            slice.swap(slots[k], slots[j]);
        }
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        let idx = self.inner.gen_range(0..slice.len());
        slice.get(idx)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed the stream was created from
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
