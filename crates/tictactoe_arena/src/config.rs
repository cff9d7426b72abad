//! Arena configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tictactoe_core::Sign;
use tracing::{debug, info, instrument};

/// Longest accepted AI thinking delay, in seconds.
pub const MAX_AI_MOVE_DELAY_SECS: f64 = 3600.0;

/// Settings supplied by the front end.
///
/// Every field has a default, so an empty TOML file is a valid config.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct ArenaConfig {
    /// Mark that opens every round.
    #[serde(default = "default_starting_sign")]
    starting_sign: Sign,

    /// Seconds the computer "thinks" before moving.
    #[serde(default = "default_ai_move_delay_secs")]
    ai_move_delay_secs: f64,

    /// Whether the computer plays the second slot.
    #[serde(default)]
    ai_enabled: bool,

    /// Name for the first slot; blank shows "Player 1".
    #[serde(default)]
    #[setters(into)]
    player1_name: String,

    /// Name for the second slot; blank shows "Player 2".
    #[serde(default)]
    #[setters(into)]
    player2_name: String,
}

#[instrument]
fn default_starting_sign() -> Sign {
    Sign::X
}

#[instrument]
fn default_ai_move_delay_secs() -> f64 {
    1.0
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            starting_sign: default_starting_sign(),
            ai_move_delay_secs: default_ai_move_delay_secs(),
            ai_enabled: false,
            player1_name: String::new(),
            player2_name: String::new(),
        }
    }
}

impl ArenaConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            starting_sign = %config.starting_sign,
            ai_enabled = config.ai_enabled,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the session cannot honour.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=MAX_AI_MOVE_DELAY_SECS).contains(&self.ai_move_delay_secs) {
            return Err(ConfigError::new(format!(
                "ai_move_delay_secs must be between 0 and {}, got {}",
                MAX_AI_MOVE_DELAY_SECS, self.ai_move_delay_secs
            )));
        }
        Ok(())
    }

    /// AI thinking delay as a [`Duration`].
    ///
    /// Out-of-range values are clamped to [`MAX_AI_MOVE_DELAY_SECS`]; NaN
    /// becomes zero.
    pub fn ai_move_delay(&self) -> Duration {
        let secs = self.ai_move_delay_secs.clamp(0.0, MAX_AI_MOVE_DELAY_SECS);
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ArenaConfig::from_toml("").unwrap();
        assert_eq!(config, ArenaConfig::default());
        assert_eq!(*config.starting_sign(), Sign::X);
        assert_eq!(config.ai_move_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_from_file_reads_all_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
starting_sign = "O"
ai_move_delay_secs = 0.25
ai_enabled = true
player1_name = "Ada"
"#
        )
        .unwrap();

        let config = ArenaConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.starting_sign(), Sign::O);
        assert_eq!(config.ai_move_delay(), Duration::from_millis(250));
        assert!(*config.ai_enabled());
        assert_eq!(config.player1_name(), "Ada");
        assert_eq!(config.player2_name(), "");
    }

    #[test]
    fn test_negative_delay_rejected() {
        let err = ArenaConfig::from_toml("ai_move_delay_secs = -1.0").unwrap_err();
        assert!(err.message.contains("ai_move_delay_secs"));
    }

    #[test]
    fn test_huge_delay_rejected() {
        let err = ArenaConfig::from_toml("ai_move_delay_secs = 1e20\nai_enabled = true")
            .unwrap_err();
        assert!(err.message.contains("ai_move_delay_secs"));
        assert!(ArenaConfig::from_toml("ai_move_delay_secs = 3600.0").is_ok());
        assert!(ArenaConfig::from_toml("ai_move_delay_secs = nan").is_err());
    }

    #[test]
    fn test_unvalidated_delay_is_clamped() {
        let huge = ArenaConfig::default().with_ai_move_delay_secs(1e20);
        assert_eq!(huge.ai_move_delay(), Duration::from_secs(3600));

        let nan = ArenaConfig::default().with_ai_move_delay_secs(f64::NAN);
        assert_eq!(nan.ai_move_delay(), Duration::ZERO);
    }

    #[test]
    fn test_unknown_sign_rejected() {
        assert!(ArenaConfig::from_toml(r#"starting_sign = "Z""#).is_err());
    }

    #[test]
    fn test_missing_file_reports_read_failure() {
        let err = ArenaConfig::from_file("/nonexistent/arena.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_setters_override_values() {
        let config = ArenaConfig::default()
            .with_ai_enabled(true)
            .with_player2_name("Grace")
            .with_ai_move_delay_secs(0.0);
        assert!(*config.ai_enabled());
        assert_eq!(config.player2_name(), "Grace");
        assert_eq!(config.ai_move_delay(), Duration::ZERO);
    }
}
