//! Notifications published by the engine.

use crate::engine::Phase;
use crate::error::MoveError;
use crate::position::Position;
use crate::types::Sign;

/// Something the presentation layer may want to redraw for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A mark was placed.
    MovePlaced {
        /// Mark that was placed.
        sign: Sign,
        /// Where it was placed.
        position: Position,
    },
    /// The turn passed to another mark.
    TurnChanged(Sign),
    /// The opponent has started thinking about a move.
    AiMoveScheduled(Sign),
    /// The round finished.
    GameEnded {
        /// Final phase, `Won` or `Draw`.
        phase: Phase,
        /// Display name of the winner; `None` for a draw.
        winner: Option<String>,
    },
    /// A move was refused and nothing changed.
    MoveRejected(MoveError),
}

/// Receives engine notifications.
///
/// Any `FnMut(&GameEvent)` closure is an observer, which covers most
/// callers:
///
/// ```
/// use tictactoe_core::{GameEngine, GameEvent, Sign};
///
/// let mut engine = GameEngine::new(Sign::X);
/// engine.subscribe(|event: &GameEvent| println!("{event:?}"));
/// ```
pub trait GameObserver {
    /// Called after the engine state has been updated.
    fn notify(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}
