//! Command-line interface for the tictactoe binary.

use clap::Parser;
use std::path::PathBuf;
use tictactoe_arena::{ArenaConfig, ConfigError};
use tictactoe_core::Sign;
use tracing::instrument;

/// Tic-tac-toe against a friend or a heuristic opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe against a friend or a heuristic opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Play against the computer
    #[arg(long)]
    pub ai: bool,

    /// Mark that opens every round (X or O)
    #[arg(long, value_parser = parse_sign)]
    pub starting_sign: Option<Sign>,

    /// Seconds the computer waits before moving
    #[arg(long)]
    pub ai_delay: Option<f64>,

    /// Name for the first player
    #[arg(long)]
    pub player1: Option<String>,

    /// Name for the second player
    #[arg(long)]
    pub player2: Option<String>,
}

impl Cli {
    /// Loads the config file, if any, and applies command-line overrides.
    #[instrument(skip(self))]
    pub fn resolve_config(&self) -> Result<ArenaConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ArenaConfig::from_file(path)?,
            None => ArenaConfig::default(),
        };

        if self.ai {
            config = config.with_ai_enabled(true);
        }
        if let Some(sign) = self.starting_sign {
            config = config.with_starting_sign(sign);
        }
        if let Some(delay) = self.ai_delay {
            config = config.with_ai_move_delay_secs(delay);
        }
        if let Some(name) = &self.player1 {
            config = config.with_player1_name(name.as_str());
        }
        if let Some(name) = &self.player2 {
            config = config.with_player2_name(name.as_str());
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_sign(s: &str) -> Result<Sign, String> {
    match s.trim().to_ascii_uppercase().as_str() {
        "X" => Ok(Sign::X),
        "O" => Ok(Sign::O),
        other => Err(format!("expected X or O, got '{}'", other)),
    }
}
