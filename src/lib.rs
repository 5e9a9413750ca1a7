//! # memory-maze
//!
//! Match engine for a memory card game: players reveal two cards per turn,
//! identical pairs are retired and scored.
//!
//! ## Design Principles
//!
//! 1. **Closed Board Variants**: `Board` is either a free board (any two
//!    cards) or an adjacency board (second card must neighbour the first).
//!    Both implement the full `SelectionRules` contract.
//!
//! 2. **No Hidden I/O**: Time comes from an injected `Clock`, randomness
//!    from a seeded `GameRng`. The engine never sleeps, spawns, or persists.
//!
//! 3. **Illegal Moves Are Values**: Selecting a face-up, matched, or
//!    non-adjacent card reports `MatchOutcome::NotMatched` and changes
//!    nothing. Only boundary misuse is an error.
//!
//! ## Modules
//!
//! - `core`: RNG, clocks, configuration, errors
//! - `cards`: Cards and pattern labels
//! - `board`: Grid, adjacency graph, board variants
//! - `engine`: Session state machine, anti-stall, items, scoring, reports

pub mod board;
pub mod cards;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Clock, GameMode, GameRng, GameRngState, ManualClock, Result, SessionConfig, SessionError,
    SystemClock,
};

pub use crate::cards::{Card, PatternId};

pub use crate::board::{
    AdjacencyBoard, AdjacencyGraph, Board, CardView, FreeBoard, Grid, Position, SelectionRules,
};

pub use crate::engine::{
    AntiStall, HintInfo, ItemEffect, ItemInventory, ItemKind, MatchOutcome, Outcome, ScoreBoard,
    Selection, Session, SessionBuilder, SessionClock, SessionReport,
};
