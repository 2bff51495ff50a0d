//! ROVTRAIL monitor daemon
//!
//! Captures validator output on a fixed cadence and archives the delta
//! between consecutive snapshots.

#![warn(missing_docs)]
#![warn(clippy::all)]

use anyhow::Result;
use clap::Parser;
use rovtrail_monitor::{MonitorConfig, RovMonitor, ValidatorConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rovtrail-monitor")]
#[command(about = "Periodic ROV snapshot capture and delta archiving", long_about = None)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seconds between validator runs
    #[arg(long)]
    interval: Option<u64>,
    /// Output directory for snapshots and deltas
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Validator command line, program first (e.g. --validator routinator vrps)
    #[arg(long, num_args = 1.., value_name = "CMD")]
    validator: Option<Vec<String>>,
    /// Stop after this many cycles instead of running forever
    #[arg(long)]
    cycles: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter("rovtrail=info")
        .init();

    let mut config = match &args.config {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };
    if let Some(interval) = args.interval {
        config.interval_secs = interval;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(command_line) = args.validator {
        if let Some(validator) = ValidatorConfig::from_command_line(command_line) {
            config.validator = validator;
        }
    }

    let mut monitor = RovMonitor::new(config)?;
    monitor.run(args.cycles)?;
    Ok(())
}
