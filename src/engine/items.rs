//! Consumable items and the per-player inventory.
//!
//! Counts never go negative: [`ItemInventory::consume`] refuses when the
//! count is zero. The engine checks availability first and consumes only
//! once the effect has been applied, so a failed use costs nothing.

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::core::{Result, SessionError};

/// The kinds of consumable item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    /// Adds seconds to the time budget.
    ExtendTime,
    /// Holds back anti-stall reshuffles for some seconds.
    SuppressShuffle,
    /// Turns one random face-down card face up.
    ForceReveal,
}

impl ItemKind {
    /// Every item kind, in display order.
    pub const ALL: [ItemKind; 3] = [
        ItemKind::ExtendTime,
        ItemKind::SuppressShuffle,
        ItemKind::ForceReveal,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ItemKind::ExtendTime => "extend-time",
            ItemKind::SuppressShuffle => "suppress-shuffle",
            ItemKind::ForceReveal => "force-reveal",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an applied item did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// The budget is now `budget_ms`.
    TimeExtended { budget_ms: u64 },
    /// Reshuffles are held back until `until_ms`.
    ShuffleSuppressed { until_ms: u64 },
    /// The card at this position was turned face up.
    Revealed(Position),
}

/// Item counts for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInventory {
    extend_time: u32,
    suppress_shuffle: u32,
    force_reveal: u32,
}

impl Default for ItemInventory {
    /// One of each.
    fn default() -> Self {
        Self {
            extend_time: 1,
            suppress_shuffle: 1,
            force_reveal: 1,
        }
    }
}

impl ItemInventory {
    /// No items at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            extend_time: 0,
            suppress_shuffle: 0,
            force_reveal: 0,
        }
    }

    /// Set the count for one kind.
    #[must_use]
    pub fn with_count(mut self, kind: ItemKind, count: u32) -> Self {
        *self.slot_mut(kind) = count;
        self
    }

    fn slot_mut(&mut self, kind: ItemKind) -> &mut u32 {
        match kind {
            ItemKind::ExtendTime => &mut self.extend_time,
            ItemKind::SuppressShuffle => &mut self.suppress_shuffle,
            ItemKind::ForceReveal => &mut self.force_reveal,
        }
    }

    #[must_use]
    pub fn count(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::ExtendTime => self.extend_time,
            ItemKind::SuppressShuffle => self.suppress_shuffle,
            ItemKind::ForceReveal => self.force_reveal,
        }
    }

    /// `(kind, count)` for every kind.
    #[must_use]
    pub fn counts(&self) -> Vec<(ItemKind, u32)> {
        ItemKind::ALL.iter().map(|&k| (k, self.count(k))).collect()
    }

    /// Is at least one of `kind` left?
    #[must_use]
    pub fn has(&self, kind: ItemKind) -> bool {
        self.count(kind) > 0
    }

    /// Add items, e.g. after a purchase.
    pub fn add(&mut self, kind: ItemKind, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Take one item. Fails without change when none remain.
    pub fn consume(&mut self, kind: ItemKind) -> Result<()> {
        let slot = self.slot_mut(kind);
        if *slot == 0 {
            return Err(SessionError::ItemUnavailable(kind));
        }
        *slot -= 1;
        Ok(())
    }
}
