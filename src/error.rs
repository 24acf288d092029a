//! Global error handling for projsnap
//!
//! This module provides a centralized error type for the failures that
//! abort a run. Per-file and post-processing failures are recovered where
//! they happen and never reach this type.

use std::io;
use thiserror::Error;

/// Global error type for projsnap operations
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Regular expression errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Snapshot writer errors
    #[error("Writer error: {0}")]
    Writer(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for projsnap operations
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Creates a SnapshotError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::SnapshotError::$error_type(format!($($arg)*))
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

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Wrap the error as a writer failure, prefixed with context
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            SnapshotError::Writer(format!("{}: {}", context, e))
        })
    }
}

// Allow converting SnapshotError to io::Error for io-based callers and tests
impl From<SnapshotError> for io::Error {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(flag: bool) -> Result<()> {
        crate::ensure!(flag, PathNotFound, "flag was {}", flag);
        Ok(())
    }

    #[test]
    fn test_ensure_macro() {
        assert!(check(true).is_ok());

        let err = check(false).unwrap_err();
        assert_eq!(err.to_string(), "Path not found: flag was false");
    }

    #[test]
    fn test_with_context() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = res.with_context(|| "creating snapshot").unwrap_err();

        assert!(matches!(err, SnapshotError::Writer(_)));
        assert_eq!(err.to_string(), "Writer error: creating snapshot: denied");
    }
}
