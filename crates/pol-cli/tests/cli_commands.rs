use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::tempdir;

fn model() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs/lc2pkpi.yaml")
}

fn polarimetry(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_polarimetry"))
        .args(args)
        .output()
        .expect("run polarimetry")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("utf8")
}

#[test]
fn table_lists_chains_and_resonances() {
    let model = model();
    let model = model.to_str().expect("utf8 path");
    let chains = stdout(&polarimetry(&["table", "--model", model]));
    assert!(chains.starts_with("| resonance | $J^P$ |"));
    assert_eq!(chains.lines().count(), 2 + 12);

    let resonances = stdout(&polarimetry(&["table", "--model", model, "--resonances"]));
    assert!(resonances.contains("| K(892) | $K(892)$ | $1^-$ |"));
    assert!(resonances.lines().any(|line| line.ends_with("| BuggBreitWigner |")));
}

#[test]
fn latex_prints_decay_array() {
    let model = model();
    let output = stdout(&polarimetry(&["latex", "--model", model.to_str().expect("utf8")]));
    assert!(output.starts_with("$$\n\\begin{array}{c}\n"));
    assert!(output.contains(r"\xrightarrow[S=0]{L=1} \pi^+ K^-"));
}

#[test]
fn hash_is_stable_between_runs() {
    let model = model();
    let model = model.to_str().expect("utf8");
    let first = stdout(&polarimetry(&["hash", "--model", model]));
    let second = stdout(&polarimetry(&["hash", "--model", model, "--reference", "1"]));
    assert_eq!(first, second);
    assert_eq!(first.lines().count(), 3);
    assert!(first.lines().all(|line| line.len() == 2 + 64));
}

#[test]
fn formulate_json_uses_cache_directory() {
    let dir = tempdir().expect("tempdir");
    let model = model();
    let args = [
        "formulate",
        "--model",
        model.to_str().expect("utf8"),
        "--cache-dir",
        dir.path().to_str().expect("utf8"),
        "--json",
    ];
    let first = stdout(&polarimetry(&args));
    let report: serde_json::Value = serde_json::from_str(&first).expect("json report");
    assert_eq!(report["evaluated"], serde_json::Value::Bool(true));
    assert!(report["components"]["z"]["expression"].is_string());
    assert_eq!(std::fs::read_dir(dir.path()).expect("cache").count(), 3);

    let second = stdout(&polarimetry(&args));
    assert_eq!(first, second);
}

#[test]
fn invalid_reference_is_rejected() {
    let model = model();
    let output = polarimetry(&[
        "formulate",
        "--model",
        model.to_str().expect("utf8"),
        "--reference",
        "4",
    ]);
    assert!(!output.status.success());
}
