//! Error types for generator operations

use std::time::Duration;

/// Errors that can occur while running the generator program
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// No generator program was configured
    #[error("No generator command configured. Set `generator.command` or DOCSPLICE_GENERATOR.")]
    NotConfigured,

    /// The program could not be found
    #[error("Generator command '{command}' not found on PATH")]
    CommandNotFound {
        /// The command as configured
        command: String,
    },

    /// I/O error while spawning or talking to the program
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request could not be encoded
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// Program exited with non-zero status
    #[error("Command failed (exit code {code}): {stderr}")]
    CommandFailed {
        /// Exit code from the subprocess
        code: i32,
        /// Captured stderr output
        stderr: String,
    },

    /// Program did not finish in time and was killed
    #[error("Command timed out after {0:?}")]
    Timeout(Duration),

    /// The run was cancelled while waiting on the program
    #[error("Cancelled")]
    Cancelled,
}

impl AgentError {
    /// Whether another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::CommandFailed { .. } | Self::Timeout(_)
        )
    }
}

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, AgentError>;
