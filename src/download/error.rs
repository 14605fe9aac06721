//! Error types for the download module.

use std::path::PathBuf;

use thiserror::Error;

use crate::remote::RemoteError;

/// Errors that can occur while downloading a selected file.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The remote request failed or returned a non-success status.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// File system error during download (create file, write, etc.)
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The listed name cannot be used as a local file name.
    #[error("invalid file name {name:?}: {reason}")]
    InvalidFileName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl DownloadError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid file name error.
    pub fn invalid_file_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidFileName {
            name: name.into(),
            reason,
        }
    }
}
