//! Error types for the Page store.

use thiserror::Error;

/// Errors that can occur during page operations.
///
/// These are the user-visible persistence failures: callers report them and
/// let the user retry. None of them leave a partial write behind.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PageError {
    /// The requested page was not found.
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Another page already uses this slug.
    #[error("Slug already in use: {0}")]
    SlugTaken(String),

    /// The page data provided is invalid.
    #[error("Page validation error: {0}")]
    Validation(String),

    /// No bearer token is available; the caller must send the user to log in.
    #[error("Not authenticated")]
    Unauthorized,

    /// The store could not be reached or failed unexpectedly.
    #[error("Page store unavailable: {0}")]
    Unavailable(String),

    /// A response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),
}
