//! Selection state machine types.
//!
//! ```text
//! Idle --select--> OneSelected --select--> (evaluate) --> Idle
//! ```
//!
//! Evaluation happens inside the second `select_card` call, so it is never
//! observable as a resting state.

use serde::{Deserialize, Serialize};

use crate::board::Position;

/// Cards chosen in the current pairing attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// No card chosen.
    #[default]
    Idle,
    /// First card face up, waiting for the second.
    OneSelected(Position),
}

impl Selection {
    /// The first card of the attempt, if any.
    #[must_use]
    pub fn first(self) -> Option<Position> {
        match self {
            Selection::Idle => None,
            Selection::OneSelected(pos) => Some(pos),
        }
    }

    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, Selection::Idle)
    }
}

/// Result of a `select_card` call.
///
/// Illegal selections also report `NotMatched`; they leave the session
/// untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Matched,
    NotMatched,
}

impl MatchOutcome {
    #[must_use]
    pub fn is_match(self) -> bool {
        matches!(self, MatchOutcome::Matched)
    }
}

/// Highlight data for the presentation layer.
///
/// On a free board, or with nothing selected, `neighbors` is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintInfo {
    pub selected: Option<Position>,
    pub neighbors: Vec<Position>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_first() {
        assert_eq!(Selection::default(), Selection::Idle);
        assert!(Selection::Idle.is_idle());
        assert_eq!(Selection::Idle.first(), None);

        let one = Selection::OneSelected(Position::new(1, 2));
        assert!(!one.is_idle());
        assert_eq!(one.first(), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_match_outcome() {
        assert!(MatchOutcome::Matched.is_match());
        assert!(!MatchOutcome::NotMatched.is_match());
    }
}
