//! Error types for coursebook-loader

use thiserror::Error;

/// Result type alias for coursebook-loader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading chapters.
///
/// [`ChapterSource`](crate::ChapterSource) never surfaces these to its
/// caller; they are logged and the static chapter is used instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from coursebook-core
    #[error("Core error: {0}")]
    Core(#[from] coursebook_core::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Failed to load markdown from {url}: HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },
}
