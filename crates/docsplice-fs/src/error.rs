//! Error types for docsplice-fs

use std::path::PathBuf;

/// Result type for docsplice-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from reading, writing, walking and config loading
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Any filesystem failure, tagged with the path involved
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Another process held the file lock past the configured timeout
    #[error("Timed out waiting for the lock on {path}")]
    LockFailed { path: PathBuf },

    /// Directory traversal failed part-way
    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
