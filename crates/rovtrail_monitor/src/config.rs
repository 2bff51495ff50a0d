//! Monitor configuration.

use crate::error::MonitorError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the monitor loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between validator runs
    pub interval_secs: u64,
    /// Directory holding the rotated snapshot files
    pub output_dir: PathBuf,
    /// Directory holding archived deltas (defaults to `<output_dir>/deltas`)
    pub archive_dir: Option<PathBuf>,
    /// External validator command
    pub validator: ValidatorConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 20 * 60,
            output_dir: PathBuf::from("./output"),
            archive_dir: None,
            validator: ValidatorConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns error if the file is unreadable or not valid configuration
    pub fn load(path: &Path) -> Result<Self, MonitorError> {
        let contents = fs::read_to_string(path).map_err(|e| MonitorError::Config {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        serde_json::from_str(&contents).map_err(|e| MonitorError::Config {
            reason: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Resolved archive directory
    #[must_use]
    pub fn archive_dir(&self) -> PathBuf {
        self.archive_dir
            .clone()
            .unwrap_or_else(|| self.output_dir.join("deltas"))
    }
}

/// External validator command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Program to invoke
    pub program: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            program: "routinator".to_string(),
            args: vec!["vrps".to_string()],
        }
    }
}

impl ValidatorConfig {
    /// Build a validator config from a command line (program plus arguments)
    #[must_use]
    pub fn from_command_line(mut parts: Vec<String>) -> Option<Self> {
        if parts.is_empty() {
            return None;
        }
        let program = parts.remove(0);
        Some(Self {
            program,
            args: parts,
        })
    }
}
