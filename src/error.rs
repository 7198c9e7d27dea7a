use std::path::PathBuf;

use crate::game::Position;

/// Errors that can occur when dropping a coin.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is outside the board")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Errors raised while writing saved cells straight into a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestoreError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),

    #[error("position {0} is already occupied")]
    Occupied(Position),

    #[error("coin at {0} has an empty cell beneath it")]
    Floating(Position),
}

/// Errors that can occur while saving or loading a game.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("malformed save at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("no saved game named '{0}'")]
    NotFound(String),

    #[error("invalid game name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SaveError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        SaveError::Malformed {
            line,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_display() {
        let err = SaveError::InvalidName {
            name: "two\nlines".to_string(),
            reason: "must be a single line",
        };
        assert_eq!(
            err.to_string(),
            "invalid game name \"two\\nlines\": must be a single line"
        );
    }

    #[test]
    fn test_move_error_display() {
        assert_eq!(MoveError::ColumnFull(3).to_string(), "column 3 is full");
        assert_eq!(
            MoveError::InvalidColumn(9).to_string(),
            "column 9 is outside the board"
        );
    }

    #[test]
    fn test_save_error_display() {
        let err = SaveError::malformed(3, "row 'x' is not an integer");
        assert_eq!(
            err.to_string(),
            "malformed save at line 3: row 'x' is not an integer"
        );
    }

    #[test]
    fn test_restore_error_display() {
        let err = RestoreError::Floating(Position::new(2, 4));
        assert_eq!(err.to_string(), "coin at (2, 4) has an empty cell beneath it");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("players.first must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: players.first must not be empty"
        );
    }
}
