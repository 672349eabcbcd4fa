//! Error types for the application

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Menu item name already in use: {0}")]
    NameConflict(String),

    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No items in the current order")]
    EmptyOrder,
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
