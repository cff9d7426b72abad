//! Tests for computer-opponent mode: scheduling, sign swaps and names.

use tictactoe_core::{
    AI_PLAYER_NAME, Board, GameEngine, Phase, PlayerSlot, Position, Sign, select_move,
};

fn ai_engine() -> GameEngine {
    let mut engine = GameEngine::new(Sign::X);
    engine.set_mode(true);
    engine
}

/// Plays the pending opponent move, panicking if none is scheduled.
fn ai_reply(engine: &mut GameEngine) -> Option<Position> {
    let ticket = engine.take_ai_request().expect("AI move scheduled");
    engine.play_ai_move(ticket).expect("AI move accepted")
}

#[test]
fn test_ai_answers_corner_with_center() {
    let mut engine = ai_engine();
    assert_eq!(engine.ai_sign(), Some(Sign::O));
    assert!(engine.take_ai_request().is_none(), "X opens, AI waits");

    engine.apply_move(0, Sign::X).unwrap();
    assert!(engine.is_current_turn_ai());
    assert!(engine.is_ai_thinking());

    assert_eq!(ai_reply(&mut engine), Some(Position::Center));
    assert_eq!(engine.current_turn(), Sign::X);
    assert!(!engine.is_ai_thinking());
    assert_eq!(engine.move_count(), 2);
}

#[test]
fn test_ai_takes_win_over_block() {
    let mut board = Board::new();
    for i in [3, 4] {
        board.set_cell(i, Sign::O).unwrap();
    }
    for i in [6, 7] {
        board.set_cell(i, Sign::X).unwrap();
    }
    assert_eq!(select_move(&board, Sign::O, Sign::X), Some(Position::MiddleRight));
}

#[test]
fn test_ai_blocks_then_wins_in_play() {
    let mut engine = ai_engine();
    engine.apply_move(0, Sign::X).unwrap();
    assert_eq!(ai_reply(&mut engine), Some(Position::Center));

    // X threatens the top row; O must block at 2.
    engine.apply_move(1, Sign::X).unwrap();
    assert_eq!(ai_reply(&mut engine), Some(Position::TopRight));

    // O now holds 2-4 and wins at 6 once X wanders off.
    engine.apply_move(8, Sign::X).unwrap();
    assert_eq!(ai_reply(&mut engine), Some(Position::BottomLeft));
    assert_eq!(engine.phase(), Phase::Won(Sign::O));
    assert_eq!(engine.winner_name(Sign::O), AI_PLAYER_NAME);
}

#[test]
fn test_only_one_ai_move_pending() {
    let mut engine = ai_engine();
    engine.apply_move(0, Sign::X).unwrap();
    let ticket = engine.take_ai_request().expect("scheduled");

    // No second ticket is issued while the first is outstanding.
    assert!(engine.take_ai_request().is_none());
    assert_eq!(ticket.sign(), Sign::O);
    assert_eq!(engine.play_ai_move(ticket), Ok(Some(Position::Center)));
    assert!(engine.take_ai_request().is_none());
}

#[test]
fn test_ticket_cancelled_by_full_reset() {
    let mut engine = ai_engine();
    engine.apply_move(0, Sign::X).unwrap();
    let ticket = engine.take_ai_request().expect("scheduled");

    engine.full_reset();
    assert_eq!(engine.play_ai_move(ticket), Ok(None));
    assert_eq!(engine.board(), &Board::new());
    assert_eq!(engine.move_count(), 0);
    assert!(!engine.ai_enabled());
}

#[test]
fn test_ticket_cancelled_even_if_ai_turn_again() {
    let mut engine = ai_engine();
    engine.apply_move(0, Sign::X).unwrap();
    let stale = engine.take_ai_request().expect("scheduled");

    // Back in AI mode and on the AI's turn, but in a later round.
    engine.set_mode(true);
    engine.apply_move(0, Sign::X).unwrap();
    let fresh = engine.take_ai_request().expect("scheduled again");

    assert_eq!(engine.play_ai_move(stale), Ok(None));
    assert_eq!(engine.move_count(), 1);
    assert_eq!(engine.play_ai_move(fresh), Ok(Some(Position::Center)));
}

#[test]
fn test_rematch_swaps_signs_and_ai_opens() {
    let mut engine = ai_engine();
    engine.rematch();
    assert_eq!(engine.ai_sign(), Some(Sign::X));
    assert_eq!(engine.human_sign(), Sign::O);
    assert_eq!(engine.current_turn(), Sign::X);
    assert!(engine.is_current_turn_ai());

    // Empty board: the AI opens in the center.
    assert_eq!(ai_reply(&mut engine), Some(Position::Center));
    assert_eq!(engine.current_turn(), Sign::O);
}

#[test]
fn test_two_rematches_restore_signs() {
    let mut engine = ai_engine();
    engine.rematch();
    engine.rematch();
    assert_eq!(engine.ai_sign(), Some(Sign::O));
    assert_eq!(engine.human_sign(), Sign::X);
}

#[test]
fn test_rematch_without_ai_keeps_signs_and_clears_round() {
    let mut engine = GameEngine::new(Sign::X);
    engine.apply_move(4, Sign::X).unwrap();
    engine.rematch();
    assert_eq!(engine.human_sign(), Sign::X);
    assert_eq!(engine.player(PlayerSlot::Two).sign, Sign::O);
    assert_eq!(engine.board(), &Board::new());
    assert_eq!(engine.move_count(), 0);
    assert_eq!(engine.current_turn(), Sign::X);
    assert!(engine.take_ai_request().is_none());
}

#[test]
fn test_rematch_keeps_names() {
    let mut engine = GameEngine::new(Sign::X);
    engine.set_player_name(PlayerSlot::One, "Ada");
    engine.set_player_name(PlayerSlot::Two, "Grace");
    engine.rematch();
    assert_eq!(engine.display_name(PlayerSlot::One), "Ada");
    assert_eq!(engine.display_name(PlayerSlot::Two), "Grace");
}

#[test]
fn test_set_mode_off_restores_default_signs() {
    let mut engine = ai_engine();
    engine.rematch();
    engine.rematch();
    engine.rematch();
    assert_eq!(engine.ai_sign(), Some(Sign::X));

    engine.set_mode(false);
    assert_eq!(engine.ai_sign(), None);
    assert_eq!(engine.player(PlayerSlot::Two).sign, Sign::O);
    assert_eq!(engine.human_sign(), Sign::X);
    assert!(engine.take_ai_request().is_none());
}

#[test]
fn test_ai_opens_when_starting_sign_is_its_own() {
    let mut engine = GameEngine::new(Sign::O);
    engine.set_mode(true);
    assert!(engine.is_current_turn_ai());
    assert_eq!(ai_reply(&mut engine), Some(Position::Center));
}

#[test]
fn test_toggle_ai_mid_round_schedules_when_ai_to_move() {
    let mut engine = GameEngine::new(Sign::X);
    engine.apply_move(0, Sign::X).unwrap();
    engine.toggle_ai();
    assert!(engine.ai_enabled());
    assert_eq!(engine.move_count(), 1, "toggle keeps the board");
    assert_eq!(ai_reply(&mut engine), Some(Position::Center));

    engine.toggle_ai();
    assert!(!engine.ai_enabled());
    assert!(engine.take_ai_request().is_none());
}

#[test]
fn test_toggle_ai_off_cancels_pending_move() {
    let mut engine = ai_engine();
    engine.apply_move(0, Sign::X).unwrap();
    let ticket = engine.take_ai_request().expect("scheduled");
    engine.toggle_ai();
    assert_eq!(engine.play_ai_move(ticket), Ok(None));
    assert_eq!(engine.current_turn(), Sign::O);
    assert!(!engine.is_ai_thinking());
}

#[test]
fn test_display_names() {
    let mut engine = GameEngine::new(Sign::X);
    assert_eq!(engine.display_name(PlayerSlot::One), "Player 1");
    assert_eq!(engine.display_name(PlayerSlot::Two), "Player 2");

    engine.set_player_name(PlayerSlot::One, "  ");
    engine.set_player_name(PlayerSlot::Two, "Grace");
    assert_eq!(engine.display_name(PlayerSlot::One), "Player 1");
    assert_eq!(engine.winner_name(Sign::O), "Grace");

    engine.set_mode(true);
    assert_eq!(engine.display_name(PlayerSlot::Two), AI_PLAYER_NAME);
    assert_eq!(engine.winner_name(Sign::X), "Player 1");
    assert_eq!(engine.winner_name(Sign::O), AI_PLAYER_NAME);

    // After a swap the human plays O and still owns the first slot.
    engine.rematch();
    assert_eq!(engine.player(PlayerSlot::One).sign, Sign::O);
    assert_eq!(engine.winner_name(Sign::O), "Player 1");
    assert_eq!(engine.winner_name(Sign::X), AI_PLAYER_NAME);
}
