//! Core error types for ROVTRAIL.

use std::fmt;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Snapshot document could not be interpreted
    MalformedSnapshot {
        /// What made the document unusable
        reason: String,
    },

    /// Input unreadable or output unwritable
    Io {
        /// Path involved in the failed operation
        path: String,
        /// Underlying reason
        reason: String,
    },

    /// Internal error (for unexpected errors)
    Internal {
        /// Error message
        message: String,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedSnapshot { reason } => {
                write!(f, "Malformed snapshot: {}", reason)
            }
            Self::Io { path, reason } => write!(f, "IO failure on {}: {}", path, reason),
            Self::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for CoreError {}

impl CoreError {
    /// Build an IO error from a path and source error
    #[must_use]
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::MalformedSnapshot {
            reason: "missing key ca_certs".to_string(),
        };
        assert_eq!(format!("{}", err), "Malformed snapshot: missing key ca_certs");

        let err = CoreError::Io {
            path: "/tmp/rov.json".to_string(),
            reason: "permission denied".to_string(),
        };
        let s = format!("{}", err);
        assert!(s.contains("/tmp/rov.json"));
        assert!(s.contains("permission denied"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = CoreError::Internal {
            message: "x".to_string(),
        };
        let err2 = CoreError::Internal {
            message: "x".to_string(),
        };
        assert_eq!(err1, err2);

        let err3 = CoreError::MalformedSnapshot {
            reason: "x".to_string(),
        };
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_io_constructor() {
        let src = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CoreError::io("/var/rov/current.json", &src);
        match err {
            CoreError::Io { path, reason } => {
                assert_eq!(path, "/var/rov/current.json");
                assert!(reason.contains("gone"));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
