//! End-of-session result record.
//!
//! The engine does no I/O; a `SessionReport` is what the caller hands to
//! the persistence/leaderboard service once a session finishes.

use serde::{Deserialize, Serialize};

use crate::core::GameMode;

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Every pair was matched in time.
    Completed,
    /// The time budget ran out first.
    TimeOver,
    /// Neither yet.
    InProgress,
}

impl Outcome {
    /// Has the session ended?
    #[must_use]
    pub fn is_final(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Hand-off tuple for result reporting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub mode: GameMode,
    pub elapsed_ms: u64,
    /// Accepted card flips.
    pub move_count: u32,
    pub score: u64,
    pub outcome: Outcome,
}

impl SessionReport {
    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a record produced by [`SessionReport::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    /// Elapsed time rounded down to whole seconds, as leaderboards store it.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / 1_000
    }
}
