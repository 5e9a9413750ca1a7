//! Error types for session construction and boundary misuse.
//!
//! Illegal moves are deliberately absent: selecting a matched, face-up or
//! non-adjacent card is reported as `MatchOutcome::NotMatched`, not an error.

use thiserror::Error;

use crate::cards::PatternId;
use crate::engine::items::ItemKind;

/// Errors surfaced at the session boundary.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Zero-sized grid, or an odd tile count with the wildcard disabled.
    #[error("invalid grid size {rows}x{cols}")]
    InvalidGridSize { rows: usize, cols: usize },

    /// Coordinate outside the grid.
    #[error("position ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// No items of the requested kind remain.
    #[error("no {0} items remaining")]
    ItemUnavailable(ItemKind),

    /// Force-reveal found no face-down card to turn.
    #[error("no face-down card left to reveal")]
    NothingToReveal,

    /// Items cannot be used once the time budget has run out.
    #[error("session time has expired")]
    SessionExpired,

    /// An explicit layout does not fit the grid.
    #[error("layout has {actual} cards, grid needs {expected}")]
    LayoutMismatch { expected: usize, actual: usize },

    /// An explicit layout holds a label an odd number of times.
    #[error("label {0} cannot be split into pairs")]
    UnpairedLabel(PatternId),

    /// An explicit layout has the wrong number of wildcards for its size.
    #[error("layout has {actual} wildcards, grid needs {expected}")]
    WildcardCount { expected: usize, actual: usize },
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SessionError::InvalidGridSize { rows: 3, cols: 3 };
        assert_eq!(err.to_string(), "invalid grid size 3x3");

        let err = SessionError::OutOfBounds {
            row: 4,
            col: 0,
            rows: 4,
            cols: 4,
        };
        assert_eq!(err.to_string(), "position (4, 0) is outside the 4x4 grid");

        let err = SessionError::ItemUnavailable(ItemKind::ExtendTime);
        assert_eq!(err.to_string(), "no extend-time items remaining");

        let err = SessionError::UnpairedLabel("A".into());
        assert_eq!(err.to_string(), "label A cannot be split into pairs");
    }
}
