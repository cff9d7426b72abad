//! Tic-tac-toe game logic.
//!
//! # Architecture
//!
//! - **Board**: nine cells and the lookups the rules need
//! - **Rules**: win, draw and "two in a line" detection
//! - **AI**: a fixed-priority heuristic opponent
//! - **Engine**: turn tracking, round lifecycle and opponent scheduling
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{GameEngine, Phase, Sign};
//!
//! let mut engine = GameEngine::new(Sign::X);
//! engine.set_mode(true);
//!
//! engine.apply_move(0, Sign::X)?;
//! let ticket = engine.take_ai_request().expect("opponent to move");
//! let reply = engine.play_ai_move(ticket)?;
//!
//! assert_eq!(reply.map(|p| p.to_index()), Some(4));
//! assert_eq!(engine.phase(), Phase::InProgress);
//! # Ok::<(), tictactoe_core::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod engine;
mod error;
mod events;
mod position;
pub mod rules;
mod types;

pub use ai::select_move;
pub use engine::{
    AI_PLAYER_NAME, AiTicket, DEFAULT_AI_SIGN, DEFAULT_HUMAN_SIGN, GameEngine, Phase,
    PlayerIdentity, PlayerSlot,
};
pub use error::{IllegalMove, MoveError};
pub use events::{GameEvent, GameObserver};
pub use position::Position;
pub use types::{BOARD_SIZE, Board, BoardError, Cell, Sign};
