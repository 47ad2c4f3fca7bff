//! Error types for docsplice-core

use std::path::PathBuf;

/// Result type for docsplice-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a file or a whole run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Explicitly requested configuration file does not exist
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration values that cannot be used
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// No provider handles this file
    #[error("Unsupported language for {path}")]
    UnsupportedLanguage { path: PathBuf },

    /// Embedding was requested without a generator
    #[error("Embedding requires a documentation generator")]
    MissingGenerator,

    /// Worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// Filesystem error from docsplice-fs
    #[error(transparent)]
    Fs(#[from] docsplice_fs::Error),

    /// Structural error from docsplice-blocks
    #[error(transparent)]
    Blocks(#[from] docsplice_blocks::Error),

    /// Generator error from docsplice-agent
    #[error(transparent)]
    Agent(#[from] docsplice_agent::AgentError),
}
