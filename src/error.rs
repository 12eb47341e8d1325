//! Error types for HashVerify
//!
//! Every failure an integrity check can hit is one of these variants. They are
//! all terminal for the invocation: nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for HashVerify operations
#[derive(Error, Debug)]
pub enum IntegrityError {
    /// I/O error while reading a file for hashing
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Source file missing before the check started
    #[error("The specified source file does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Copy file missing before the check started
    #[error("The specified copy file does not exist: {}", .0.display())]
    CopyNotFound(PathBuf),

    /// Invalid or incomplete configuration
    #[error("{0}")]
    ConfigError(String),

    /// Worker pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

impl IntegrityError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// True for errors raised before any hashing was attempted
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound(_) | Self::CopyNotFound(_) | Self::ConfigError(_)
        )
    }
}

/// Result type alias for HashVerify operations
pub type Result<T> = std::result::Result<T, IntegrityError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| IntegrityError::io(path, e))
    }
}
