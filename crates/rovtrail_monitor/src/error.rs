//! Monitor error type.

use rovtrail_archive::ArchiveError;
use rovtrail_core::CoreError;

/// Monitor-related errors
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Validator subprocess could not be run
    #[error("validator failed: {reason}")]
    Validator {
        /// What went wrong launching or capturing the subprocess
        reason: String,
    },
    /// Configuration file unreadable or invalid
    #[error("config error: {reason}")]
    Config {
        /// What made the configuration unusable
        reason: String,
    },
    /// Snapshot loading or diffing failed
    #[error(transparent)]
    Core(#[from] CoreError),
    /// Archiving or rotation failed
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MonitorError::Validator {
            reason: "no such program".to_string(),
        };
        assert_eq!(err.to_string(), "validator failed: no such program");
    }

    #[test]
    fn test_core_error_passes_through() {
        let core = CoreError::MalformedSnapshot {
            reason: "missing collection".to_string(),
        };
        let err = MonitorError::from(core.clone());
        assert_eq!(err.to_string(), core.to_string());
    }
}
