//! External validator invocation.
//!
//! The relying-party tool is a black box: we launch it, capture its
//! stdout into the incoming snapshot file, and read whatever it wrote.
//! Its exit status is logged but never interpreted beyond that.

use crate::config::ValidatorConfig;
use crate::error::MonitorError;
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Outcome of one validator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit code, when the process exited normally
    pub status: Option<i32>,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RunOutcome {
    /// True when the validator exited with status zero
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs the external validator subprocess
#[derive(Debug, Clone)]
pub struct ValidatorRunner {
    config: ValidatorConfig,
}

impl ValidatorRunner {
    /// Create a runner for the given command
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Run the validator, writing its stdout to `snapshot_out` and its
    /// stderr to `stderr_out`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns error if the capture files cannot be created or the
    /// program cannot be launched. A non-zero exit is logged, not an
    /// error: the snapshot file is read regardless.
    pub fn run(&self, snapshot_out: &Path, stderr_out: &Path) -> Result<RunOutcome, MonitorError> {
        let stdout = File::create(snapshot_out).map_err(|e| MonitorError::Validator {
            reason: format!("cannot create {}: {}", snapshot_out.display(), e),
        })?;
        let stderr = File::create(stderr_out).map_err(|e| MonitorError::Validator {
            reason: format!("cannot create {}: {}", stderr_out.display(), e),
        })?;

        let started = Instant::now();
        let status = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .map_err(|e| MonitorError::Validator {
                reason: format!("cannot launch {}: {}", self.config.program, e),
            })?;

        let outcome = RunOutcome {
            status: status.code(),
            duration: started.elapsed(),
        };
        if outcome.success() {
            tracing::debug!(duration_ms = outcome.duration.as_millis() as u64, "validator run finished");
        } else {
            tracing::warn!(
                status = ?outcome.status,
                "validator exited with failure, reading its output anyway"
            );
        }
        Ok(outcome)
    }
}
