//! Error types for chatdown library.

use std::io;
use thiserror::Error;

/// Result type alias for chatdown operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or rendering a transcript.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input does not describe a transcript.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The document tree is malformed (text node with children, runaway nesting).
    ///
    /// This points at a broken upstream scraper rather than at unusual content.
    #[error("Structural violation: {0}")]
    StructuralViolation(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => Error::Io(err.into()),
            _ => Error::InvalidInput(err.to_string()),
        }
    }
}
