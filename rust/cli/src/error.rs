//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`] maps
//! the variant to an exit code and prints it on stderr.

use blackjack_engine::errors::GameError;
use thiserror::Error;

/// Custom error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input or command-line arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Round log database could not be reached or prepared
    #[error("Database error: {0}")]
    Database(String),

    /// Engine-related error
    #[error("Engine error: {0}")]
    Engine(#[from] GameError),

    /// Input ended before the command could finish
    #[error("Interrupted: {0}")]
    Interrupted(String),
}

impl From<rusqlite::Error> for CliError {
    fn from(error: rusqlite::Error) -> Self {
        CliError::Database(error.to_string())
    }
}
