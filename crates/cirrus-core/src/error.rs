//! Centralized error types for the Cirrus application.
//!
//! Each variant carries the technical cause; `user_message()` returns the
//! copy the rendering layer shows. Errors are terminal for the current fetch
//! cycle and never retried automatically.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Name search yielded no match. User-facing, not retried.
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Coordinate-based lookup failed at some stage.
    #[error("Location weather lookup failed: {0}")]
    LocateFailed(String),

    /// Transport or decode failure during a name-based fetch.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Device location unavailable (permission, timeout, no service).
    #[error("Device location unavailable: {0}")]
    Location(String),

    /// Local persistence failure.
    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::CityNotFound(_) => "City not found. Check the spelling and try again.",
            AppError::LocateFailed(_) => "Could not detect location weather.",
            AppError::Fetch(_) => "Unable to fetch weather. Check your connection and try again.",
            AppError::Location(_) => "Location unavailable. Check permissions and try again.",
            AppError::Store(_) => "Saving your places failed. Please try again.",
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}
