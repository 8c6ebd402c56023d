//! Common error types for mp3meta

use thiserror::Error;

/// Common result type for mp3meta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across mp3meta crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or command-line parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
