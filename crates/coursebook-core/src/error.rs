//! Error types for coursebook-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for coursebook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur at the I/O boundary of Coursebook.
///
/// The parsing functions never produce these; only filesystem, network,
/// and configuration code does.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Filesystem error, tagged with the path that was being accessed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Malformed input at the tooling boundary (glob patterns, manifests).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A chapter source file or registry entry already exists.
    #[error("Chapter already exists: {}", path.display())]
    DuplicateChapter {
        /// Conflicting file or registry location
        path: PathBuf,
    },

    /// Two source files would be written to the same generated module.
    #[error("Duplicate output file: {}", path.display())]
    DuplicateOutput {
        /// Output path claimed twice
        path: PathBuf,
    },

    /// A required command-line argument was not supplied.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// Markdown could not be fetched.
    #[error("Failed to load markdown from {url}: {message}")]
    Fetch {
        /// Requested URL
        url: String,
        /// What went wrong
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates an I/O error carrying the offending path.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a new parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse(message.into())
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Creates a new fetch error.
    pub fn fetch<U, M>(url: U, message: M) -> Self
    where
        U: Into<String>,
        M: Into<String>,
    {
        Error::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }
}
