//! Match engine: selection cycle, anti-stall, clock, items, scoring.
//!
//! ## Key Types
//!
//! - `Session`: Owns a board and drives select -> evaluate -> hide
//! - `AntiStall`: Mismatch streak and lazy reshuffle flag
//! - `SessionClock`: Remaining time against a budget
//! - `ItemInventory`: Consumable counts, never negative
//! - `ScoreBoard`: Per-pair scores
//! - `SessionReport`: Result hand-off record

pub mod anti_stall;
pub mod items;
pub mod report;
pub mod score;
pub mod selection;
pub mod session;
pub mod session_clock;

pub use anti_stall::AntiStall;
pub use items::{ItemEffect, ItemInventory, ItemKind};
pub use report::{Outcome, SessionReport};
pub use score::ScoreBoard;
pub use selection::{HintInfo, MatchOutcome, Selection};
pub use session::{GraphNode, GraphState, Session, SessionBuilder};
pub use session_clock::SessionClock;
