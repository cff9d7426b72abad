//! Tic-tac-toe arena: configuration and a timed session around the engine.
//!
//! The rules live in [`tictactoe_core`]. This crate adds what a playable
//! program needs on top: TOML configuration and a [`GameSession`] that gives
//! the computer opponent its thinking delay on tokio's clock.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod session;

pub use config::{ArenaConfig, ConfigError, MAX_AI_MOVE_DELAY_SECS};
pub use session::GameSession;
