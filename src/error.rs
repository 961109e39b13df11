//! Error types for the tee-dl library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching files.
#[derive(Error, Debug)]
pub enum Error {
    /// The URL has no usable final path segment to name the file after.
    #[error("Cannot derive a file name from URL: {url}")]
    InvalidDestination {
        /// The offending URL.
        url: String,
    },

    /// The download directory could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The staging file could not be created.
    #[error("Failed to create {}: {source}", path.display())]
    CreateFile {
        /// Path of the staging file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Reading the response body or writing it to disk failed mid-transfer.
    #[error("Transfer into {} failed: {source}", path.display())]
    Copy {
        /// Path of the staging file being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The finished staging file could not be moved into place.
    #[error("Failed to rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        /// Staging file path.
        from: PathBuf,
        /// Final destination path.
        to: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// HTTP request error (DNS, connect, non-2xx status).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Other I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more downloads in a keep-going batch failed.
    #[error("{failed} of {total} download(s) failed")]
    BatchFailed {
        /// Number of failed downloads.
        failed: usize,
        /// Number of URLs in the batch.
        total: usize,
    },
}

/// A specialized `Result` type for tee-dl operations.
pub type Result<T> = std::result::Result<T, Error>;
