//! Error types and handling for SizeSync
//!
//! An [`Error`] aborts a run and is routed to the error report. Failures on a
//! single file never become an [`Error`]; they end up as lines in
//! [`SyncResult::errors`](crate::SyncResult) instead.

use std::path::PathBuf;

/// Main error type for SizeSync operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("{message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// Source directory does not exist
    #[error("Source directory does not exist: {}", .path.display())]
    SourceNotFound {
        /// Absolute path that was looked up
        path: PathBuf,
    },

    /// Source exists but is not a directory
    #[error("Source is not a directory: {}", .path.display())]
    NotADirectory {
        /// Absolute path of the offending entry
        path: PathBuf,
    },

    /// Destination root could not be created
    #[error("Cannot create destination directory: {} ({message})", .path.display())]
    DestinationUncreatable {
        /// Absolute destination path
        path: PathBuf,
        /// Underlying failure
        message: String,
    },

    /// A directory could not be mirrored under the destination during traversal
    #[error("Cannot mirror directory {}: {message}", .path.display())]
    DirectoryMirror {
        /// Destination directory that failed
        path: PathBuf,
        /// Underlying failure
        message: String,
    },

    /// Report file could not be written
    #[error("Cannot write report {}: {message}", .path.display())]
    Report {
        /// Report path (or report directory when the path was never built)
        path: PathBuf,
        /// Underlying failure
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Operation cancelled
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

/// Result type alias for SizeSync operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new report error
    pub fn report<P: Into<PathBuf>>(path: P, error: &std::io::Error) -> Self {
        Self::Report {
            path: path.into(),
            message: error.to_string(),
        }
    }

    /// Create a new generic error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_io_error_keeps_message(message in ".*") {
            let io_error = std::io::Error::new(std::io::ErrorKind::Other, message.clone());
            let error = Error::from(io_error);
            prop_assert!(matches!(error, Error::Io { .. }), "expected Error::Io");
            prop_assert_eq!(error.to_string(), message);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test file");
        let error = Error::from(io_error);

        assert!(matches!(error, Error::Io { .. }));
        assert_eq!(error.to_string(), "test file");
    }

    #[test]
    fn test_source_not_found_message_contains_path() {
        let error = Error::SourceNotFound {
            path: PathBuf::from("/nonexistent/source"),
        };

        assert_eq!(
            error.to_string(),
            "Source directory does not exist: /nonexistent/source"
        );
    }

    #[test]
    fn test_destination_uncreatable_message() {
        let error = Error::DestinationUncreatable {
            path: PathBuf::from("/readonly/dest"),
            message: "Permission denied (os error 13)".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Cannot create destination directory: /readonly/dest (Permission denied (os error 13))"
        );
    }

    #[test]
    fn test_report_error_message() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = Error::report("/reports/2025-03-09_example.txt", &io_error);

        assert_eq!(
            error.to_string(),
            "Cannot write report /reports/2025-03-09_example.txt: denied"
        );
    }

    #[test]
    fn test_cancelled_error() {
        assert_eq!(Error::Cancelled.to_string(), "Operation cancelled");
    }
}
