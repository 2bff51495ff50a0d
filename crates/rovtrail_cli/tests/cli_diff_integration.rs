//! CLI integration tests
//!
//! These drive the `rovtrail` binary end to end: exit codes, the delta
//! file it writes, and the guarantee that failures leave no output.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const OLD: &str = r#"{
    "ca_certs": [{"id": "A", "v": 1}],
    "roas": [{"id": "R1", "asn": 64496}],
    "tals": [{"name": "T1", "v": 1}]
}"#;

const NEW: &str = r#"{
    "ca_certs": [{"id": "A", "v": 2}, {"id": "B", "v": 1}],
    "roas": [],
    "tals": [{"name": "T1", "v": 1}]
}"#;

fn write_fixtures(dir: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
    let old = dir.path().join("old.json");
    let new = dir.path().join("new.json");
    let out = dir.path().join("delta.json");
    fs::write(&old, OLD).unwrap();
    fs::write(&new, NEW).unwrap();
    (old, new, out)
}

fn run_cli(args: &[&PathBuf]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rovtrail"))
        .args(args.iter().map(|p| p.as_os_str()))
        .output()
        .expect("failed to execute rovtrail")
}

#[test]
fn test_diff_writes_delta_and_exits_zero() {
    let dir = TempDir::new().unwrap();
    let (old, new, out) = write_fixtures(&dir);

    let output = run_cli(&[&old, &new, &out]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let delta: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(delta["taldiff"], serde_json::json!([]));
    assert_eq!(delta["cadiff"].as_array().unwrap().len(), 2);
    assert_eq!(delta["roadiff"].as_array().unwrap().len(), 1);
    assert_eq!(delta["roadiff"][0]["after"], serde_json::json!({}));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cas +1 -0 ~1"), "stdout: {}", stdout);
}

#[test]
fn test_argument_count_mismatch_exits_one_with_usage() {
    let dir = TempDir::new().unwrap();
    let (old, new, _out) = write_fixtures(&dir);

    let output = run_cli(&[&old, &new]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {}", stderr);
}

#[test]
fn test_malformed_input_fails_without_partial_output() {
    let dir = TempDir::new().unwrap();
    let (old, new, out) = write_fixtures(&dir);
    fs::write(&old, "{").unwrap();

    let output = run_cli(&[&old, &new, &out]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("old.json"), "stderr: {}", stderr);
    assert!(!out.exists(), "no partial delta may be left behind");
}

#[test]
fn test_missing_input_names_the_path() {
    let dir = TempDir::new().unwrap();
    let (_old, new, out) = write_fixtures(&dir);
    let absent = dir.path().join("absent.json");

    let output = run_cli(&[&absent, &new, &out]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("absent.json"), "stderr: {}", stderr);
    assert!(!out.exists());
}

#[test]
fn test_identical_inputs_produce_empty_delta() {
    let dir = TempDir::new().unwrap();
    let (old, _new, out) = write_fixtures(&dir);

    let output = run_cli(&[&old, &old, &out]);
    assert!(output.status.success());

    let delta: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        delta,
        serde_json::json!({"taldiff": [], "cadiff": [], "roadiff": []})
    );
}
