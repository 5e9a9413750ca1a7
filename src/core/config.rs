//! Session configuration types.
//!
//! Callers configure a session at startup by providing:
//! - `GameMode`: Free board ("simple") or adjacency board ("hard")
//! - `SessionConfig`: Policy values (thresholds, budgets, weights, items)
//!
//! The engine never hardcodes these policies; `SessionConfig::for_mode`
//! supplies the defaults the game ships with.

use serde::{Deserialize, Serialize};

use crate::engine::items::ItemInventory;

/// Which board variant a session plays on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Any two face-down cards may be paired.
    Simple,
    /// The second card of a pairing attempt must neighbour the first.
    Hard,
}

impl GameMode {
    /// Stable lowercase name, used in result records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::Simple => "simple",
            GameMode::Hard => "hard",
        }
    }

    /// Default grid dimensions `(rows, cols)` for this mode.
    #[must_use]
    pub const fn default_dimensions(self) -> (usize, usize) {
        match self {
            GameMode::Simple => (4, 4),
            GameMode::Hard => (7, 7),
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy values for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Consecutive mismatches before an anti-stall reshuffle is flagged.
    pub shuffle_threshold: u32,

    /// How long the presentation layer should keep a mismatched pair
    /// visible before calling `hide_all_flipped`.
    pub reveal_duration_ms: u64,

    /// Initial time budget for the session.
    pub time_budget_ms: u64,

    /// Score weight given to every card. A matched pair scores twice this.
    pub score_weight: u32,

    /// Allow an odd tile count by adding a single unpaired wildcard.
    /// When false an odd grid is rejected.
    pub allow_wildcard: bool,

    /// Only start counting mismatches toward the threshold after the
    /// first successful match.
    pub gate_until_first_match: bool,

    /// Items available at session start.
    pub starting_items: ItemInventory,

    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            shuffle_threshold: 8,
            reveal_duration_ms: 1_000,
            time_budget_ms: 180_000,
            score_weight: 10,
            allow_wildcard: true,
            gate_until_first_match: false,
            starting_items: ItemInventory::default(),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Defaults for a game mode.
    ///
    /// Hard mode gets a longer budget and gated anti-stall counting.
    #[must_use]
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Simple => Self::default(),
            GameMode::Hard => Self {
                time_budget_ms: 300_000,
                gate_until_first_match: true,
                ..Self::default()
            },
        }
    }

    /// Set the mismatch threshold.
    #[must_use]
    pub fn with_shuffle_threshold(mut self, threshold: u32) -> Self {
        self.shuffle_threshold = threshold;
        self
    }

    /// Set the reveal duration.
    #[must_use]
    pub fn with_reveal_duration_ms(mut self, ms: u64) -> Self {
        self.reveal_duration_ms = ms;
        self
    }

    /// Set the initial time budget.
    #[must_use]
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    /// Set the per-card score weight.
    #[must_use]
    pub fn with_score_weight(mut self, weight: u32) -> Self {
        self.score_weight = weight;
        self
    }

    /// Enable or disable the wildcard filler for odd grids.
    #[must_use]
    pub fn with_wildcard(mut self, allow: bool) -> Self {
        self.allow_wildcard = allow;
        self
    }

    /// Enable or disable gated anti-stall counting.
    #[must_use]
    pub fn with_gate_until_first_match(mut self, gate: bool) -> Self {
        self.gate_until_first_match = gate;
        self
    }

    /// Set the starting inventory.
    #[must_use]
    pub fn with_items(mut self, items: ItemInventory) -> Self {
        self.starting_items = items;
        self
    }

    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
