//! Game session: the engine plus a timer for the opponent's delayed move.

use crate::config::ArenaConfig;
use std::time::Duration;
use tictactoe_core::{
    AiTicket, GameEngine, GameObserver, MoveError, PlayerSlot, Position, Sign,
};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Stand-in deadline when `now + delay` does not fit in an [`Instant`].
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Opponent move waiting for its delay to pass.
#[derive(Debug)]
struct PendingAiMove {
    ticket: AiTicket,
    deadline: Instant,
}

/// Owns a [`GameEngine`] and runs the opponent's moves after a delay.
///
/// The session is driven from a single task. Commands are plain method
/// calls; the opponent's move is awaited with [`GameSession::next_ai_move`],
/// typically inside a `tokio::select!` next to the input source.
#[derive(Debug)]
pub struct GameSession {
    engine: GameEngine,
    ai_delay: Duration,
    pending: Option<PendingAiMove>,
}

impl GameSession {
    /// Builds a session from configuration.
    #[instrument(skip(config))]
    pub fn new(config: &ArenaConfig) -> Self {
        let mut engine = GameEngine::new(*config.starting_sign());
        engine.set_player_name(PlayerSlot::One, config.player1_name().clone());
        engine.set_player_name(PlayerSlot::Two, config.player2_name().clone());

        let mut session = Self {
            engine,
            ai_delay: config.ai_move_delay(),
            pending: None,
        };
        if *config.ai_enabled() {
            session.set_mode(true);
        }
        info!(
            ai_enabled = session.engine.ai_enabled(),
            delay_ms = session.ai_delay.as_millis() as u64,
            "Session created"
        );
        session
    }

    /// Read access to the engine for rendering.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Registers an engine observer.
    pub fn subscribe(&mut self, observer: impl GameObserver + Send + 'static) {
        self.engine.subscribe(observer);
    }

    /// True while an opponent move is waiting on its timer.
    pub fn has_pending_ai_move(&self) -> bool {
        self.pending.is_some()
    }

    /// Places a human mark. See [`GameEngine::apply_move`].
    pub fn apply_move(&mut self, index: usize, sign: Sign) -> Result<(), MoveError> {
        let result = self.engine.apply_move(index, sign);
        self.arm_ai_timer();
        result
    }

    /// Places a mark for whichever human is to move.
    ///
    /// Refused while it is the computer's turn.
    pub fn apply_human_move(&mut self, position: Position) -> Result<(), MoveError> {
        let sign = if self.engine.is_current_turn_ai() {
            self.engine.human_sign()
        } else {
            self.engine.current_turn()
        };
        self.apply_move(position.to_index(), sign)
    }

    /// Starts the next round. See [`GameEngine::rematch`].
    pub fn rematch(&mut self) {
        self.cancel_ai_timer();
        self.engine.rematch();
        self.arm_ai_timer();
    }

    /// Switches mode and starts a fresh round. See [`GameEngine::set_mode`].
    pub fn set_mode(&mut self, ai_enabled: bool) {
        self.cancel_ai_timer();
        self.engine.set_mode(ai_enabled);
        self.arm_ai_timer();
    }

    /// Flips computer mode mid-round. See [`GameEngine::toggle_ai`].
    pub fn toggle_ai(&mut self) {
        self.cancel_ai_timer();
        self.engine.toggle_ai();
        self.arm_ai_timer();
    }

    /// Returns to the menu state and drops any pending opponent move.
    pub fn full_reset(&mut self) {
        self.cancel_ai_timer();
        self.engine.full_reset();
    }

    /// Renames a player.
    pub fn set_player_name(&mut self, slot: PlayerSlot, name: impl Into<String>) {
        self.engine.set_player_name(slot, name);
    }

    /// Waits for the pending opponent move and plays it.
    ///
    /// Never completes while no move is pending. Cancel-safe: dropping the
    /// future before the delay passes leaves the move pending.
    #[instrument(skip(self))]
    pub async fn next_ai_move(&mut self) -> Result<Option<Position>, MoveError> {
        let Some(deadline) = self.pending.as_ref().map(|p| p.deadline) else {
            return std::future::pending().await;
        };
        tokio::time::sleep_until(deadline).await;

        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        let played = self.engine.play_ai_move(pending.ticket)?;
        self.arm_ai_timer();
        Ok(played)
    }

    fn arm_ai_timer(&mut self) {
        if let Some(ticket) = self.engine.take_ai_request() {
            if self.pending.is_some() {
                warn!("Replacing an AI move that was still pending");
            }
            debug!(delay_ms = self.ai_delay.as_millis() as u64, "AI timer armed");
            let now = Instant::now();
            let deadline = now.checked_add(self.ai_delay).unwrap_or_else(|| {
                warn!("AI delay overflows the clock; using a far-future deadline");
                now + FAR_FUTURE
            });
            self.pending = Some(PendingAiMove { ticket, deadline });
        }
    }

    fn cancel_ai_timer(&mut self) {
        if self.pending.take().is_some() {
            debug!("AI timer cancelled");
        }
    }
}
