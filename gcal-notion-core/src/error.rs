//! Error types for the gcal-notion ecosystem.

use thiserror::Error;

/// Errors that can occur while syncing calendar events into the record store.
#[derive(Error, Debug)]
pub enum GcalNotionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar source error: {0}")]
    Source(String),

    #[error("Calendar source returned {status}: {body}")]
    SourceApi { status: u16, body: String },

    #[error("Record store error: {0}")]
    Store(String),

    #[error("Record store returned {status}: {body}")]
    StoreApi { status: u16, body: String },

    #[error("Sync state error: {0}")]
    State(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for gcal-notion operations.
pub type GcalNotionResult<T> = Result<T, GcalNotionError>;
