use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for DeepGuard
#[derive(Error, Debug)]
pub enum DeepGuardError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Secret key unavailable: {0}")]
    KeyMissing(String),

    #[error("Unable to write alert log {}: {source}", path.display())]
    LogWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Prompt error: {0}")]
    Prompt(String),
}

/// Result type alias for DeepGuard
pub type Result<T> = std::result::Result<T, DeepGuardError>;

impl DeepGuardError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        DeepGuardError::Config(msg.into())
    }

    /// Create a missing-key error
    pub fn key_missing<S: Into<String>>(msg: S) -> Self {
        DeepGuardError::KeyMissing(msg.into())
    }

    pub fn log_write_failed<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        DeepGuardError::LogWriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn prompt<S: Into<String>>(msg: S) -> Self {
        DeepGuardError::Prompt(msg.into())
    }
}
