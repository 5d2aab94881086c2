//! Common error types for uniplan

use thiserror::Error;

/// Common result type for uniplan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across uniplan modules
#[derive(Error, Debug)]
pub enum Error {
    /// Remote read failed: network error, non-success HTTP status,
    /// or a payload that is not in an accepted shape
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Persisting the choice list did not succeed
    #[error("Persist error: {0}")]
    Persist(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
