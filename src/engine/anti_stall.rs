//! Anti-stall controller.
//!
//! Counts consecutive mismatches. Once the streak reaches the threshold
//! outside a suppression window, a reshuffle of the unmatched cards is
//! flagged; the match engine applies it lazily on the next hide.
//!
//! ## Suppression
//!
//! `suppress_until` blocks both raising a new pending shuffle and applying
//! one that is already pending. A pending shuffle survives the window and
//! is applied by the first hide at or after `suppress_until`.

use serde::{Deserialize, Serialize};

/// Mismatch streak and pending reshuffle state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntiStall {
    fail_streak: u32,
    threshold: u32,
    pending_shuffle: bool,
    /// Clock reading before which reshuffles are held back.
    suppress_until: u64,
    /// When set, mismatches only count after the first match.
    gated: bool,
    counting_started: bool,
}

impl AntiStall {
    /// Create a controller. A threshold of zero is treated as one.
    #[must_use]
    pub fn new(threshold: u32, gated: bool) -> Self {
        Self {
            fail_streak: 0,
            threshold: threshold.max(1),
            pending_shuffle: false,
            suppress_until: 0,
            gated,
            counting_started: !gated,
        }
    }

    #[must_use]
    pub fn fail_streak(&self) -> u32 {
        self.fail_streak
    }

    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    #[must_use]
    pub fn pending_shuffle(&self) -> bool {
        self.pending_shuffle
    }

    #[must_use]
    pub fn suppress_until(&self) -> u64 {
        self.suppress_until
    }

    #[must_use]
    pub fn counting_started(&self) -> bool {
        self.counting_started
    }

    /// Is `now` inside the suppression window?
    #[must_use]
    pub fn is_suppressed(&self, now_ms: u64) -> bool {
        now_ms < self.suppress_until
    }

    /// Record a mismatch. Returns true if this raised a pending shuffle.
    pub fn record_mismatch(&mut self, now_ms: u64) -> bool {
        if !self.counting_started {
            return false;
        }

        self.fail_streak = self.fail_streak.saturating_add(1);
        if self.fail_streak >= self.threshold && !self.is_suppressed(now_ms) {
            self.pending_shuffle = true;
            self.fail_streak = 0;
            return true;
        }
        false
    }

    /// Record a match. Resets the streak; a pending shuffle stays pending.
    pub fn record_match(&mut self) {
        self.fail_streak = 0;
        self.counting_started = true;
    }

    /// Hold back reshuffles until `until_ms`. Never shortens a window.
    pub fn suppress(&mut self, until_ms: u64) {
        self.suppress_until = self.suppress_until.max(until_ms);
    }

    /// Should the engine reshuffle now?
    #[must_use]
    pub fn should_apply(&self, now_ms: u64) -> bool {
        self.pending_shuffle && !self.is_suppressed(now_ms)
    }

    /// Clear the pending flag once the reshuffle has been applied.
    pub fn mark_applied(&mut self) {
        self.pending_shuffle = false;
    }

    /// Back to the initial state, keeping threshold and gating policy.
    pub fn reset(&mut self) {
        *self = Self::new(self.threshold, self.gated);
    }
}
