//! Harness errors

use thiserror::Error;

/// Failure while saving regression output
#[derive(Debug, Error)]
pub enum TestError {
    /// A rendered grid could not be saved
    #[error("cannot save '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// The output directory could not be made
    #[error("cannot create output directory '{path}': {message}")]
    DirectoryCreate { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type TestResult<T> = Result<T, TestError>;
