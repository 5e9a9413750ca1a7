//! Card system: tiles and their pattern labels.
//!
//! ## Key Types
//!
//! - `PatternId`: Label shown on a card face; equal labels match
//! - `Card`: One tile with flip/match status and score weight
//!
//! ## Wildcards
//!
//! Odd grids carry one unpaired wildcard. It can be flipped like any other
//! card but never pairs and is ignored by the completion check.

pub mod card;
pub mod pattern;

pub use card::{Card, PatternId, WILDCARD_LABEL};
