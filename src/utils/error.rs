//! Error types for the batch converter.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.
//! Only configuration-level errors escape a batch run; per-file errors are turned
//! into failed job results by the worker.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Validation errors for a conversion request.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Path-related validation error
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    /// Invalid settings error
    #[error("Settings error: {0}")]
    Settings(String),
}

/// File path errors.
#[derive(Error, Debug)]
pub enum PathError {
    /// Path does not exist
    #[error("Not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotDirectory(PathBuf),
    /// Path lies outside the root it was expected under
    #[error("{path} is not inside {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },
    /// IO error accessing the path
    #[error("IO error on {path}: {message}")]
    IO { path: PathBuf, message: String },
}

/// Main error type for the converter.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Request validation failed; the batch never started
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Decoding, resizing or encoding failed
    #[error("Processing error: {0}")]
    Processing(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Unsupported or invalid image format
    #[error("Format error: {0}")]
    Format(String),

    /// The worker pool itself broke down
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Convenience result type for converter operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

// Helper methods for error creation
impl ConvertError {
    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }

    pub fn worker<T: Into<String>>(msg: T) -> Self {
        Self::Worker(msg.into())
    }

    /// Returns `true` when the batch was rejected before any work was dispatched.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFound(path.into()))
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotDirectory(path.into()))
    }

    pub fn path_io(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        Self::Path(PathError::IO {
            path: path.into(),
            message: err.to_string(),
        })
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

// Convert std::io::Error to ConvertError
impl From<io::Error> for ConvertError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert PathError to ConvertError
impl From<PathError> for ConvertError {
    fn from(err: PathError) -> Self {
        Self::Validation(ValidationError::Path(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_distinguishable_from_file_errors() {
        let err: ConvertError = ValidationError::settings("Width cannot be 0").into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Settings error: Width cannot be 0");

        assert!(!ConvertError::processing("bad pixels").is_validation());
    }

    #[test]
    fn path_error_converts_into_validation() {
        let err: ConvertError = PathError::NotFound(PathBuf::from("/nope")).into();
        assert!(matches!(
            err,
            ConvertError::Validation(ValidationError::Path(PathError::NotFound(_)))
        ));
    }
}
