//! Global error handling for codedump
//!
//! Only setup and output-stream failures surface as errors. Problems with
//! individual files or directories are rendered as placeholders in the report.

use std::io;
use thiserror::Error;

/// Global error type for codedump operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Interactive prompt errors
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for codedump operations
pub type Result<T> = std::result::Result<T, ExportError>;

impl From<ExportError> for io::Error {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Io(inner) => inner,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

/// Creates an ExportError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ExportError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
