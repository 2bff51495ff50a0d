//! ROVTRAIL CLI
//!
//! Thin wrapper around the diff engine: load two snapshots, write the
//! pretty-printed delta, print a one-line summary.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::Parser;
use color_eyre::Result;
use rovtrail_core::{CoreError, CoreResult};
use rovtrail_diff::{Delta, DiffEngine};
use rovtrail_snapshot::SnapshotLoader;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rovtrail")]
#[command(about = "Diff two ROV snapshots into a delta record", long_about = None)]
struct Cli {
    /// Path to the older snapshot
    old: PathBuf,
    /// Path to the newer snapshot
    new: PathBuf,
    /// Path the delta is written to
    output: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // argument-count mismatch exits 1 with the usage message
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => {
            let _ = err.print();
            std::process::exit(0);
        }
    };

    let loader = SnapshotLoader::new();
    let old = loader.load_path(&cli.old)?;
    let new = loader.load_path(&cli.new)?;

    let delta = DiffEngine::new().diff(&old, &new);
    write_delta(&cli.output, &delta)?;

    println!("{}: {}", cli.output.display(), delta.summary());
    Ok(())
}

/// Write the delta through a temp file so no partial record is ever
/// visible at the output path.
fn write_delta(path: &Path, delta: &Delta) -> CoreResult<()> {
    let text = delta.to_pretty_json()?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| CoreError::io(dir.display().to_string(), &e))?;
    fs::write(temp.path(), format!("{}\n", text))
        .map_err(|e| CoreError::io(path.display().to_string(), &e))?;
    temp.persist(path).map_err(|e| CoreError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
