// src/error.rs
// Error type shared by every part of the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for flashdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, studying or saving a deck.
///
/// The first three variants are contract violations by the caller and are
/// reported immediately instead of being silently ignored.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument was outside its documented domain (e.g. quality > 5).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not allowed in the selector's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// No card state exists for the given key.
    #[error("card not found: {0}")]
    NotFound(String),

    /// The card source contained no usable cards.
    #[error("no valid cards found in {}", .0.display())]
    EmptyDeck(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}
