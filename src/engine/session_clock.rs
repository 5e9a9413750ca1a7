//! Session clock: elapsed and remaining time against a budget.

use serde::{Deserialize, Serialize};

/// Time budget bookkeeping. Readings come from the session's injected
/// [`Clock`](crate::core::Clock); this type only stores the numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    budget_ms: u64,
    started_at: u64,
}

impl SessionClock {
    #[must_use]
    pub fn new(budget_ms: u64, started_at: u64) -> Self {
        Self {
            budget_ms,
            started_at,
        }
    }

    #[must_use]
    pub fn budget_ms(&self) -> u64 {
        self.budget_ms
    }

    #[must_use]
    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    /// Milliseconds since the session started.
    #[must_use]
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at)
    }

    /// `budget - elapsed`, negative once overrun. Saturates at the `i64`
    /// range, so a huge budget never reads as expired.
    #[must_use]
    pub fn remaining_ms(&self, now_ms: u64) -> i64 {
        let remaining = i128::from(self.budget_ms) - i128::from(self.elapsed_ms(now_ms));
        i64::try_from(remaining).unwrap_or(if remaining > 0 { i64::MAX } else { i64::MIN })
    }

    /// True once remaining time is at or below zero.
    #[must_use]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.remaining_ms(now_ms) <= 0
    }

    /// Add to the budget. Already-elapsed time is unaffected.
    pub fn extend_budget(&mut self, ms: u64) {
        self.budget_ms = self.budget_ms.saturating_add(ms);
    }

    /// Start counting again from `now_ms` with a new budget.
    pub fn restart(&mut self, budget_ms: u64, now_ms: u64) {
        self.budget_ms = budget_ms;
        self.started_at = now_ms;
    }
}
