//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictree_core::Mark;
use tracing::{debug, info, instrument};

/// Who sits opposite the first human.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Opponent {
    /// A second person at the same terminal.
    Human,
    /// The game-tree player.
    Computer,
}

/// Settings for one game.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Who plays against the first human.
    #[serde(default = "default_opponent")]
    opponent: Opponent,

    /// Mark played by the computer.
    #[serde(default = "default_computer_mark")]
    computer_mark: Mark,

    /// Print outcome odds after each move against the computer.
    #[serde(default = "default_show_odds")]
    show_odds: bool,
}

#[instrument]
fn default_opponent() -> Opponent {
    Opponent::Computer
}

#[instrument]
fn default_computer_mark() -> Mark {
    Mark::O
}

#[instrument]
fn default_show_odds() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            opponent: default_opponent(),
            computer_mark: default_computer_mark(),
            show_odds: default_show_odds(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            opponent = %config.opponent,
            computer_mark = %config.computer_mark,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads from `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides on top of the loaded values.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        opponent: Option<Opponent>,
        computer_mark: Option<Mark>,
        hide_odds: bool,
    ) -> Self {
        if let Some(opponent) = opponent {
            self.opponent = opponent;
        }
        if let Some(mark) = computer_mark {
            self.computer_mark = mark;
        }
        if hide_odds {
            self.show_odds = false;
        }
        self
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
