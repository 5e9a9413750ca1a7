//! A single tile on the board.
//!
//! `Card` tracks identity (the pattern it shows when face up) and the
//! flip/match status. Exactly two cards share a `PatternId`, except for an
//! optional wildcard filler on odd grids.

use serde::{Deserialize, Serialize};

/// Pattern label shown on a card face.
///
/// Two cards match when their labels are exactly equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternId(pub String);

impl PatternId {
    /// Create a pattern label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatternId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for PatternId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// Label carried by the wildcard filler card.
pub const WILDCARD_LABEL: &str = "*";

/// A card on the board.
///
/// ## Invariant
///
/// `is_matched` implies `is_flipped`. All mutation goes through
/// [`Card::flip`], [`Card::hide`], [`Card::set_matched`] and
/// [`Card::reset`], which preserve it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: PatternId,
    is_flipped: bool,
    is_matched: bool,
    is_wildcard: bool,
    score_weight: u32,
    /// Clock reading of the most recent reveal. `None` if never revealed.
    last_revealed_at: Option<u64>,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: PatternId, score_weight: u32) -> Self {
        Self {
            id,
            is_flipped: false,
            is_matched: false,
            is_wildcard: false,
            score_weight,
            last_revealed_at: None,
        }
    }

    /// Create the unpaired filler used on odd grids. Scores nothing.
    #[must_use]
    pub fn wildcard() -> Self {
        Self {
            is_wildcard: true,
            ..Self::new(PatternId::new(WILDCARD_LABEL), 0)
        }
    }

    #[must_use]
    pub fn id(&self) -> &PatternId {
        &self.id
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.is_matched
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.is_wildcard
    }

    #[must_use]
    pub fn score_weight(&self) -> u32 {
        self.score_weight
    }

    #[must_use]
    pub fn last_revealed_at(&self) -> Option<u64> {
        self.last_revealed_at
    }

    /// Can this card be turned face up right now?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }

    /// Do two cards form a pair? Wildcards never pair.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        !self.is_wildcard && !other.is_wildcard && self.id == other.id
    }

    /// Turn the card face up and record when.
    pub fn flip(&mut self, now_ms: u64) {
        self.is_flipped = true;
        self.last_revealed_at = Some(now_ms);
    }

    /// Turn the card face down. No-op once matched.
    pub fn hide(&mut self) {
        if !self.is_matched {
            self.is_flipped = false;
        }
    }

    /// Retire the card as part of a matched pair.
    pub fn set_matched(&mut self) {
        self.is_matched = true;
        self.is_flipped = true;
    }

    /// Back to face down and unmatched, forgetting reveal history.
    pub fn reset(&mut self) {
        self.is_flipped = false;
        self.is_matched = false;
        self.last_revealed_at = None;
    }
}
