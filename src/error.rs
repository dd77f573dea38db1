//! Error types for Oinori Bot.

use std::time::Duration;

/// Top-level error type for the bot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("LINE API error: {0}")]
    Line(#[from] LineError),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// LINE Messaging API errors.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    #[error("LINE API returned {status} for {endpoint}: {body}")]
    ApiStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),
}

/// OCR engine errors.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("Failed to spawn OCR process: {0}")]
    Spawn(String),

    #[error("OCR process failed: {0}")]
    Failed(String),

    #[error("OCR timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the bot.
pub type Result<T> = std::result::Result<T, Error>;
