//! The monitor loop.

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::validator::{RunOutcome, ValidatorRunner};
use rovtrail_archive::{DeltaArchive, SnapshotRotation};
use rovtrail_core::Timestamp;
use rovtrail_diff::{DeltaSummary, DiffEngine};
use rovtrail_snapshot::{Snapshot, SnapshotLoader};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Counters for monitor observability
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorMetrics {
    /// Cycles that produced an archived delta
    pub cycles_completed: u64,
    /// Cycles aborted by an error
    pub cycles_failed: u64,
    /// Deltas that actually contained changes
    pub deltas_with_changes: u64,
    /// Wall clock of the most recent completed cycle
    pub last_cycle: Option<Timestamp>,
}

impl MonitorMetrics {
    /// Record a completed cycle
    pub fn record_completion(&mut self, at: Timestamp, changed: bool) {
        self.cycles_completed += 1;
        if changed {
            self.deltas_with_changes += 1;
        }
        self.last_cycle = Some(at);
    }

    /// Record a failed cycle
    pub fn record_failure(&mut self) {
        self.cycles_failed += 1;
    }
}

/// What one cycle produced
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Capture timestamp of the cycle
    pub timestamp: Timestamp,
    /// Where the delta record landed
    pub delta_path: PathBuf,
    /// Per-collection change counts
    pub summary: DeltaSummary,
    /// Validator subprocess outcome
    pub validator: RunOutcome,
}

/// Owned-state monitor loop.
///
/// Each cycle: run the validator into the incoming snapshot file, diff
/// the result against the previous snapshot, archive the delta, promote
/// incoming to current, and keep the fresh snapshot in memory as the
/// next "previous" so each document is parsed exactly once.
pub struct RovMonitor {
    config: MonitorConfig,
    rotation: SnapshotRotation,
    archive: DeltaArchive,
    runner: ValidatorRunner,
    loader: SnapshotLoader,
    engine: DiffEngine,
    previous: Option<Snapshot>,
    metrics: MonitorMetrics,
}

impl RovMonitor {
    /// Set up the monitor, creating output and archive directories
    ///
    /// # Errors
    ///
    /// Returns error if a directory cannot be created
    pub fn new(config: MonitorConfig) -> Result<Self, MonitorError> {
        let rotation = SnapshotRotation::create(&config.output_dir)?;
        let archive = DeltaArchive::open(config.archive_dir())?;
        let runner = ValidatorRunner::new(config.validator.clone());
        Ok(Self {
            config,
            rotation,
            archive,
            runner,
            loader: SnapshotLoader::new(),
            engine: DiffEngine::new(),
            previous: None,
            metrics: MonitorMetrics::default(),
        })
    }

    /// Current metrics
    #[must_use]
    pub fn metrics(&self) -> &MonitorMetrics {
        &self.metrics
    }

    /// Delta archive backing this monitor
    #[must_use]
    pub fn archive(&self) -> &DeltaArchive {
        &self.archive
    }

    /// Ensure a current snapshot exists, running the validator once to
    /// seed it when missing. The very first capture is also copied to
    /// the immutable seed file.
    ///
    /// # Errors
    ///
    /// Returns error if the seeding run or the copy fails
    pub fn bootstrap(&mut self) -> Result<(), MonitorError> {
        if self.rotation.has_current() {
            return Ok(());
        }
        tracing::info!("no current snapshot, seeding from a first validator run");
        self.runner
            .run(&self.rotation.current(), &self.rotation.validator_err())?;
        self.rotation.seed_from_current()?;
        Ok(())
    }

    /// Run one capture-diff-archive cycle
    ///
    /// # Errors
    ///
    /// Returns error if the validator cannot be run, either snapshot
    /// cannot be loaded, or the delta cannot be archived. No partial
    /// delta record is left behind and the current snapshot file is
    /// only replaced after the delta is safely archived.
    pub fn run_cycle(&mut self) -> Result<CycleReport, MonitorError> {
        let timestamp = Timestamp::now();
        let validator = self
            .runner
            .run(&self.rotation.incoming(), &self.rotation.validator_err())?;

        // previous snapshot: reuse the one loaded last cycle when we have it
        let previous = match self.previous.take() {
            Some(snapshot) => snapshot,
            None => self.loader.load_path(&self.rotation.current())?,
        };
        let fresh = self.loader.load_path(&self.rotation.incoming())?;

        let delta = self.engine.diff(&previous, &fresh);
        let summary = delta.summary();
        let delta_path = self.archive.write(&delta, timestamp)?;
        self.rotation.promote()?;
        self.previous = Some(fresh);

        self.metrics.record_completion(timestamp, delta.has_changes());
        tracing::info!(
            summary = %summary,
            path = %delta_path.display(),
            "cycle complete"
        );
        Ok(CycleReport {
            timestamp,
            delta_path,
            summary,
            validator,
        })
    }

    /// Run the loop on the configured cadence.
    ///
    /// A failed cycle is logged and retried on the next tick; sleeping
    /// accounts for the time the cycle itself took. `max_cycles` bounds
    /// the loop for bounded runs; `None` runs until the process dies.
    ///
    /// # Errors
    ///
    /// Returns error only when bootstrap fails; cycle errors are
    /// absorbed into the metrics.
    pub fn run(&mut self, max_cycles: Option<u64>) -> Result<(), MonitorError> {
        self.bootstrap()?;
        let interval = Duration::from_secs(self.config.interval_secs);
        let mut ticks = 0u64;
        loop {
            let started = Instant::now();
            tracing::info!(tick = ticks, "starting capture cycle");
            if let Err(e) = self.run_cycle() {
                self.metrics.record_failure();
                tracing::error!(error = %e, "cycle failed, retrying next interval");
            }
            ticks += 1;
            if let Some(max) = max_cycles {
                if ticks >= max {
                    return Ok(());
                }
            }
            let elapsed = started.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
    }
}
