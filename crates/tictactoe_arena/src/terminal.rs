//! Line-oriented terminal front end.

use anyhow::Result;
use tictactoe_arena::{ArenaConfig, GameSession};
use tictactoe_core::{GameEvent, Phase, PlayerSlot, Position};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  1-9 or a square name   place your mark (e.g. 5, center, top-left)
  rematch                play again, swapping marks against the computer
  mode ai | mode pvp     start over against the computer or a friend
  toggle                 switch computer control without clearing the board
  name <1|2> <text>      rename a player
  menu                   back to the start menu (cancels the computer's move)
  board                  show the board
  help                   show this help
  quit                   exit";

/// A parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Move(Position),
    Rematch,
    Mode(bool),
    Toggle,
    Name(PlayerSlot, String),
    Menu,
    Board,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match (head.to_ascii_lowercase().as_str(), rest) {
            ("rematch" | "r", "") => Input::Rematch,
            ("mode", "ai") => Input::Mode(true),
            ("mode", "pvp") => Input::Mode(false),
            ("toggle", "") => Input::Toggle,
            ("menu", "") => Input::Menu,
            ("board", "") => Input::Board,
            ("help" | "?", "") => Input::Help,
            ("quit" | "q" | "exit", "") => Input::Quit,
            ("name", args) => match args.split_once(char::is_whitespace) {
                Some(("1", name)) => Input::Name(PlayerSlot::One, name.trim().to_string()),
                Some(("2", name)) => Input::Name(PlayerSlot::Two, name.trim().to_string()),
                _ => Input::Unknown(line.to_string()),
            },
            _ => match Position::parse_input(line) {
                Some(position) => Input::Move(position),
                None => Input::Unknown(line.to_string()),
            },
        }
    }
}

/// Runs the interactive game until `quit` or end of input.
#[instrument(skip(config))]
pub async fn run(config: ArenaConfig) -> Result<()> {
    let mut session = GameSession::new(&config);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    session.subscribe(move |event: &GameEvent| {
        let _ = event_tx.send(event.clone());
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n", HELP);
    render(&session);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                if !handle_input(&mut session, Input::parse(&line)) {
                    break;
                }
            }
            played = session.next_ai_move() => {
                if let Err(e) = played {
                    warn!(error = %e, "AI move failed");
                }
            }
        }

        let mut redraw = false;
        while let Ok(event) = event_rx.try_recv() {
            redraw |= announce(&event);
        }
        if redraw {
            render(&session);
        }
    }

    info!("Goodbye");
    Ok(())
}

/// Applies one command. Returns `false` when the player wants to quit.
fn handle_input(session: &mut GameSession, input: Input) -> bool {
    debug!(?input, "Handling input");
    match input {
        Input::Move(position) => {
            // Rejections are reported through the MoveRejected event.
            let _ = session.apply_human_move(position);
        }
        Input::Rematch => session.rematch(),
        Input::Mode(ai_enabled) => session.set_mode(ai_enabled),
        Input::Toggle => session.toggle_ai(),
        Input::Name(slot, name) => {
            session.set_player_name(slot, name);
            render(session);
        }
        Input::Menu => {
            session.full_reset();
            println!("Back at the menu. Type 'mode ai' or 'mode pvp' to start.");
        }
        Input::Board => render(session),
        Input::Help => println!("{}", HELP),
        Input::Quit => return false,
        Input::Unknown(text) if text.is_empty() => {}
        Input::Unknown(text) => println!("Unknown command '{}'. Type 'help'.", text),
    }
    true
}

/// Prints a line for an event. Returns whether the board should be redrawn.
fn announce(event: &GameEvent) -> bool {
    match event {
        GameEvent::MovePlaced { sign, position } => {
            println!("{} plays {}", sign, position);
            true
        }
        GameEvent::TurnChanged(_) => true,
        GameEvent::AiMoveScheduled(_) => false,
        GameEvent::GameEnded { winner, .. } => {
            match winner {
                Some(name) => println!("*** {} wins! ***", name),
                None => println!("*** Draw ***"),
            }
            println!("Type 'rematch' to play again or 'menu' to go back.");
            true
        }
        GameEvent::MoveRejected(err) => {
            println!("{}", err);
            false
        }
    }
}

fn render(session: &GameSession) {
    let engine = session.engine();
    println!("\n{}\n", engine.board());

    let status = match engine.phase() {
        Phase::InProgress if engine.is_current_turn_ai() => {
            format!(
                "{} ({}) is thinking...",
                engine.display_name(PlayerSlot::Two),
                engine.current_turn()
            )
        }
        Phase::InProgress => {
            let turn = engine.current_turn();
            let slot = if turn == engine.human_sign() {
                PlayerSlot::One
            } else {
                PlayerSlot::Two
            };
            format!("{} to move ({})", turn, engine.display_name(slot))
        }
        phase => format!("Round over: {}", phase),
    };
    println!("{}", status);
}
