//! Error types for the render pipeline

use thiserror::Error;

/// Result type alias for render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating, rendering, or delivering a page
#[derive(Error, Debug)]
pub enum Error {
    /// The request payload had an unrecognized shape
    #[error("Invalid render request")]
    InvalidRequest,

    /// The requested output format is not one of the recognized values
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Navigation did not finish within the deadline
    #[error("Navigation timed out after {0}ms")]
    NavigationTimeout(u64),

    /// The engine failed while navigating, executing a script, or capturing
    /// the page; carries the underlying engine fault
    #[error("Render engine error: {0}")]
    Engine(anyhow::Error),

    /// A chunked write to the output sink failed
    #[error("Output transport error: {0}")]
    Transport(#[source] std::io::Error),

    /// Uncategorized failure
    #[error("{0}")]
    Internal(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Engine(err)
    }
}
