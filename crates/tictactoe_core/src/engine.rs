//! Turn engine for tic-tac-toe.
//!
//! [`GameEngine`] owns the board and every piece of round state: whose turn
//! it is, how many marks have been placed, whether the round is over, and
//! which mark the computer opponent plays. It never sleeps or spawns; when
//! the opponent should move it hands out an [`AiTicket`] that the caller
//! redeems after its own delay with [`GameEngine::play_ai_move`].

use crate::ai;
use crate::error::{IllegalMove, MoveError};
use crate::events::{GameEvent, GameObserver};
use crate::position::Position;
use crate::rules;
use crate::types::{BOARD_SIZE, Board, BoardError, Cell, Sign};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Name shown for the computer-controlled slot.
pub const AI_PLAYER_NAME: &str = "AI Player";

/// Mark the opponent plays after a mode change or full reset.
pub const DEFAULT_AI_SIGN: Sign = Sign::O;

/// Mark the human plays after a mode change or full reset.
pub const DEFAULT_HUMAN_SIGN: Sign = Sign::X;

/// Status of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Phase {
    /// Marks are still being placed.
    #[display("in progress")]
    InProgress,
    /// A line was completed.
    #[display("won by {}", _0)]
    Won(Sign),
    /// The board filled with no line.
    #[display("draw")]
    Draw,
}

impl Phase {
    /// Returns true once the round has finished.
    pub fn is_over(self) -> bool {
        !matches!(self, Phase::InProgress)
    }
}

/// One of the two player slots shown by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// First slot; always a human.
    #[display("Player 1")]
    One,
    /// Second slot; the computer when AI mode is on.
    #[display("Player 2")]
    Two,
}

/// A player's resolved name and current mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct PlayerIdentity {
    /// Display name.
    pub name: String,
    /// Mark the player uses this round.
    pub sign: Sign,
}

/// Permission to make one delayed opponent move.
///
/// Tickets carry the reset epoch they were issued in. Any reset bumps the
/// epoch, so a ticket held across a reset is refused.
#[derive(Debug, PartialEq, Eq)]
pub struct AiTicket {
    epoch: u64,
    sign: Sign,
}

impl AiTicket {
    /// Mark the opponent will play.
    pub fn sign(&self) -> Sign {
        self.sign
    }
}

/// Tic-tac-toe game engine.
pub struct GameEngine {
    board: Board,
    starting_sign: Sign,
    current_turn: Sign,
    move_count: usize,
    phase: Phase,
    ai_enabled: bool,
    ai_sign: Sign,
    human_sign: Sign,
    ai_thinking: bool,
    epoch: u64,
    ai_request: Option<AiTicket>,
    player1_name: String,
    player2_name: String,
    observers: Vec<Box<dyn GameObserver + Send>>,
}

impl GameEngine {
    /// Creates an engine in two-player mode with `starting_sign` to move.
    #[instrument]
    pub fn new(starting_sign: Sign) -> Self {
        Self {
            board: Board::new(),
            starting_sign,
            current_turn: starting_sign,
            move_count: 0,
            phase: Phase::InProgress,
            ai_enabled: false,
            ai_sign: DEFAULT_AI_SIGN,
            human_sign: DEFAULT_HUMAN_SIGN,
            ai_thinking: false,
            epoch: 0,
            ai_request: None,
            player1_name: String::new(),
            player2_name: String::new(),
            observers: Vec::new(),
        }
    }

    /// Registers an observer for every subsequent event.
    pub fn subscribe(&mut self, observer: impl GameObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark whose turn it is.
    pub fn current_turn(&self) -> Sign {
        self.current_turn
    }

    /// Status of the round.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Marks placed this round.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Mark that opens every round.
    pub fn starting_sign(&self) -> Sign {
        self.starting_sign
    }

    /// Whether the computer controls one side.
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// Mark the computer plays, or `None` in two-player mode.
    pub fn ai_sign(&self) -> Option<Sign> {
        self.ai_enabled.then_some(self.ai_sign)
    }

    /// Mark the human in the first slot plays.
    pub fn human_sign(&self) -> Sign {
        self.human_sign
    }

    /// True when it is the computer's turn to move.
    pub fn is_current_turn_ai(&self) -> bool {
        self.ai_enabled && self.current_turn == self.ai_sign
    }

    /// True while an opponent move is scheduled but not yet played.
    pub fn is_ai_thinking(&self) -> bool {
        self.ai_thinking
    }

    /// Contents of a square.
    pub fn cell_state(&self, index: usize) -> Result<Cell, BoardError> {
        self.board.get_cell(index)
    }

    /// Index into [`rules::LINES`] of the line that won the round.
    pub fn winning_line(&self) -> Option<usize> {
        match self.phase {
            Phase::Won(sign) => rules::winning_line(&self.board, sign),
            _ => None,
        }
    }

    /// Resolved name and mark for a slot.
    pub fn player(&self, slot: PlayerSlot) -> PlayerIdentity {
        let sign = match slot {
            PlayerSlot::One => self.human_sign,
            PlayerSlot::Two => self.ai_sign,
        };
        PlayerIdentity::new(self.display_name(slot), sign)
    }

    /// Name shown for a slot.
    ///
    /// Blank names fall back to the slot label; the second slot reads
    /// [`AI_PLAYER_NAME`] while AI mode is on.
    pub fn display_name(&self, slot: PlayerSlot) -> String {
        let raw = match slot {
            PlayerSlot::One => &self.player1_name,
            PlayerSlot::Two if self.ai_enabled => return AI_PLAYER_NAME.to_string(),
            PlayerSlot::Two => &self.player2_name,
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            slot.to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Name credited when `sign` completes a line.
    pub fn winner_name(&self, sign: Sign) -> String {
        if self.ai_enabled && sign == self.ai_sign {
            AI_PLAYER_NAME.to_string()
        } else if sign == self.human_sign {
            self.display_name(PlayerSlot::One)
        } else {
            self.display_name(PlayerSlot::Two)
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Configuration
    // ─────────────────────────────────────────────────────────────

    /// Updates a player's name. Takes effect immediately.
    #[instrument(skip(self, name))]
    pub fn set_player_name(&mut self, slot: PlayerSlot, name: impl Into<String>) {
        let name = name.into();
        debug!(name = %name, "Player name changed");
        match slot {
            PlayerSlot::One => self.player1_name = name,
            PlayerSlot::Two => self.player2_name = name,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Places `sign` at `index` if the rules allow it.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] when the index is out of range, the round is
    /// over, it is not `sign`'s turn, or the square is taken. A rejected
    /// move changes nothing.
    #[instrument(skip(self), fields(turn = %self.current_turn, moves = self.move_count))]
    pub fn apply_move(&mut self, index: usize, sign: Sign) -> Result<(), MoveError> {
        let position = match self.validate_move(index, sign) {
            Ok(position) => position,
            Err(err) => {
                warn!(%err, "Move rejected");
                self.emit(GameEvent::MoveRejected(err));
                return Err(err);
            }
        };

        self.board.set_cell(index, sign)?;
        self.move_count += 1;
        debug!(%position, "Mark placed");
        self.emit(GameEvent::MovePlaced { sign, position });

        self.end_turn();
        Ok(())
    }

    fn validate_move(&self, index: usize, sign: Sign) -> Result<Position, MoveError> {
        let position = Position::from_index(index).ok_or(MoveError::InvalidIndex(index))?;
        if self.phase.is_over() {
            return Err(IllegalMove::GameOver(self.phase).into());
        }
        if sign != self.current_turn {
            return Err(IllegalMove::WrongTurn {
                expected: self.current_turn,
                requested: sign,
            }
            .into());
        }
        if !self.board.is_empty(index) {
            return Err(IllegalMove::CellOccupied(index).into());
        }
        Ok(position)
    }

    /// Decides the round after each placed mark.
    fn end_turn(&mut self) {
        let sign = self.current_turn;
        if let Some(line) = rules::winning_line(&self.board, sign) {
            debug!(line, "Line completed");
            self.finish(Phase::Won(sign));
        } else if self.move_count >= BOARD_SIZE {
            self.finish(Phase::Draw);
        } else {
            self.change_turn();
        }
    }

    fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        let winner = match phase {
            Phase::Won(sign) => Some(self.winner_name(sign)),
            _ => None,
        };
        info!(%phase, winner = ?winner, moves = self.move_count, "Game over");
        self.emit(GameEvent::GameEnded { phase, winner });
    }

    fn change_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
        self.emit(GameEvent::TurnChanged(self.current_turn));
        if self.is_current_turn_ai() {
            self.schedule_ai_move();
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Opponent scheduling
    // ─────────────────────────────────────────────────────────────

    fn schedule_ai_move(&mut self) {
        if self.ai_thinking {
            debug!("AI move already pending");
            return;
        }
        self.ai_thinking = true;
        self.ai_request = Some(AiTicket {
            epoch: self.epoch,
            sign: self.ai_sign,
        });
        debug!(epoch = self.epoch, sign = %self.ai_sign, "AI move scheduled");
        self.emit(GameEvent::AiMoveScheduled(self.ai_sign));
    }

    /// Hands out the ticket for a newly scheduled opponent move.
    ///
    /// Returns `None` when nothing was scheduled since the last call.
    pub fn take_ai_request(&mut self) -> Option<AiTicket> {
        self.ai_request.take()
    }

    /// Redeems a ticket: picks and plays the opponent's move.
    ///
    /// Tickets from before the latest reset are discarded. The move is only
    /// played if the round is still running and it is still the
    /// opponent's turn; otherwise `Ok(None)` is returned.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn play_ai_move(&mut self, ticket: AiTicket) -> Result<Option<Position>, MoveError> {
        if ticket.epoch != self.epoch {
            debug!(ticket_epoch = ticket.epoch, "Discarding cancelled AI move");
            return Ok(None);
        }
        self.ai_thinking = false;

        if self.phase.is_over() || !self.is_current_turn_ai() {
            debug!(phase = %self.phase, turn = %self.current_turn, "AI move no longer wanted");
            return Ok(None);
        }

        let Some(position) = ai::select_move(&self.board, self.ai_sign, self.human_sign) else {
            warn!(moves = self.move_count, "No move available for AI");
            return Ok(None);
        };

        info!(%position, sign = %self.ai_sign, "AI plays");
        self.apply_move(position.to_index(), self.ai_sign)?;
        Ok(Some(position))
    }

    fn cancel_ai_move(&mut self) {
        if self.ai_thinking {
            debug!(epoch = self.epoch, "Cancelling pending AI move");
        }
        self.epoch += 1;
        self.ai_thinking = false;
        self.ai_request = None;
    }

    // ─────────────────────────────────────────────────────────────
    //  Round lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Starts the next round, swapping marks between human and computer.
    ///
    /// In two-player mode the marks stay where they are. Names are kept.
    #[instrument(skip(self))]
    pub fn rematch(&mut self) {
        if self.ai_enabled {
            std::mem::swap(&mut self.ai_sign, &mut self.human_sign);
            info!(ai = %self.ai_sign, human = %self.human_sign, "Swapped signs for rematch");
        } else {
            debug!("Two-player rematch keeps signs");
        }
        self.reset_round();
    }

    /// Switches between two-player and computer-opponent mode.
    ///
    /// Always restores the default marks and starts a fresh round.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, ai_enabled: bool) {
        info!(ai_enabled, "Game mode set");
        self.ai_enabled = ai_enabled;
        self.ai_sign = DEFAULT_AI_SIGN;
        self.human_sign = DEFAULT_HUMAN_SIGN;
        self.reset_round();
    }

    /// Flips computer-opponent mode without clearing the board.
    ///
    /// Marks return to their defaults. If the computer now owns the side to
    /// move, it is asked for a move.
    #[instrument(skip(self))]
    pub fn toggle_ai(&mut self) {
        self.cancel_ai_move();
        self.ai_enabled = !self.ai_enabled;
        self.ai_sign = DEFAULT_AI_SIGN;
        self.human_sign = DEFAULT_HUMAN_SIGN;
        info!(ai_enabled = self.ai_enabled, "AI toggled");

        if self.is_current_turn_ai() && !self.phase.is_over() && self.move_count < BOARD_SIZE {
            self.schedule_ai_move();
        }
    }

    /// Returns to the pre-game configuration used by the menu.
    ///
    /// Disables the computer, restores default marks, clears the board and
    /// cancels any pending opponent move.
    #[instrument(skip(self))]
    pub fn full_reset(&mut self) {
        info!("Full reset");
        self.ai_enabled = false;
        self.ai_sign = DEFAULT_AI_SIGN;
        self.human_sign = DEFAULT_HUMAN_SIGN;
        self.reset_round();
    }

    fn reset_round(&mut self) {
        self.cancel_ai_move();
        self.board.reset();
        self.move_count = 0;
        self.phase = Phase::InProgress;
        self.current_turn = self.starting_sign;
        self.emit(GameEvent::TurnChanged(self.current_turn));

        if self.is_current_turn_ai() {
            self.schedule_ai_move();
        }
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(Sign::X)
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("board", &self.board)
            .field("current_turn", &self.current_turn)
            .field("move_count", &self.move_count)
            .field("phase", &self.phase)
            .field("ai_enabled", &self.ai_enabled)
            .field("ai_sign", &self.ai_sign)
            .field("human_sign", &self.human_sign)
            .field("ai_thinking", &self.ai_thinking)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}
