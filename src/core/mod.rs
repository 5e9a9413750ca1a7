//! Core engine types: RNG, clocks, configuration, errors.
//!
//! This module contains the building blocks shared by the board and the
//! match engine. Sessions are configured via `SessionConfig` rather than
//! by modifying the engine.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{GameMode, SessionConfig};
pub use error::{Result, SessionError};
pub use rng::{GameRng, GameRngState};
