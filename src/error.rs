//! Structured error types.

use std::path::PathBuf;

/// Errors of a move requested by one of the players.
///
/// These are input errors: the game loop reports them and asks again. They are
/// never raised inside the search.
#[derive(Debug, PartialEq, Eq, Clone, Copy, thiserror::Error)]
pub enum GameError {
    #[error("column {0} does not exist")]
    InvalidColumn(usize),

    /// Column is full.
    #[error("column {0} is full")]
    ColumnFull(usize),
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
