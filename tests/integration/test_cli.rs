use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fmwdoc() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fmwdoc"));
    for var in [
        "RUST_LOG",
        "FMWDOC_DEFAULT_FORMAT",
        "FMWDOC_SORT_TRANSFORMERS",
        "FMWDOC_EXTENSIONS",
        "FMWDOC_MARKDOWN_SUFFIX",
        "FMWDOC_LOG_FILE",
        "FMWDOC_LOG_DIR",
        "FMWDOC_QUIET",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn workspace_with_fixture(dir: &Path) -> PathBuf {
    let target = dir.join("treefarm.fmw");
    fs::copy(fixture("treefarm.fmw"), &target).unwrap();
    target
}

#[test]
fn test_single_file_writes_markdown_next_to_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = workspace_with_fixture(temp_dir.path());
    let expected = temp_dir.path().join("treefarm_documentation.md");

    fmwdoc()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Documentation generated successfully: {}",
            expected.display()
        )));

    let report = fs::read_to_string(&expected).unwrap();
    assert!(report.starts_with("# treefarm Documentation\n"));
    assert!(report.contains("### Sorter (ID: 5)"));
}

#[test]
fn test_json_format_writes_stem_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = workspace_with_fixture(temp_dir.path());

    fmwdoc().arg(&input).arg("json").assert().success();

    let json = fs::read_to_string(temp_dir.path().join("treefarm.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["datasets"][0]["keyword"], "SRC1");
}

#[test]
fn test_workspace_config_selects_default_format() {
    let temp_dir = TempDir::new().unwrap();
    let input = workspace_with_fixture(temp_dir.path());
    fs::write(
        temp_dir.path().join("fmwdoc.toml"),
        "[render]\ndefault_format = \"dot\"\n",
    )
    .unwrap();

    fmwdoc().arg(&input).assert().success();

    let dot = fs::read_to_string(temp_dir.path().join("treefarm.dot")).unwrap();
    assert!(dot.starts_with("digraph {"));
}

#[test]
fn test_directory_mode_counts_processed_files() {
    let temp_dir = TempDir::new().unwrap();
    workspace_with_fixture(temp_dir.path());
    fs::write(temp_dir.path().join("empty.txt"), "").unwrap();
    fs::write(temp_dir.path().join("README.md"), "# not a workspace").unwrap();

    fmwdoc()
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 files."));

    assert!(temp_dir.path().join("empty_documentation.md").exists());
    assert!(temp_dir.path().join("treefarm_documentation.md").exists());
    assert!(!temp_dir.path().join("README_documentation.md").exists());
}

#[test]
fn test_directory_mode_reports_failures_and_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    workspace_with_fixture(temp_dir.path());
    fs::write(temp_dir.path().join("broken.fmw"), vec![0xffu8, 0xfe, 0xfd]).unwrap();

    fmwdoc()
        .arg(temp_dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Processed 1 files."))
        .stderr(predicate::str::contains("Error processing broken.fmw"));

    assert!(temp_dir.path().join("treefarm_documentation.md").exists());
}

#[test]
fn test_missing_input_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    fmwdoc()
        .arg(temp_dir.path().join("absent.fmw"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error processing absent.fmw"));
}

#[test]
fn test_missing_path_prints_usage() {
    fmwdoc()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_format_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = workspace_with_fixture(temp_dir.path());

    fmwdoc()
        .arg(&input)
        .arg("pdf")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'pdf'"));
}

#[test]
fn test_invalid_config_aborts_before_rendering() {
    let temp_dir = TempDir::new().unwrap();
    let input = workspace_with_fixture(temp_dir.path());
    fs::write(
        temp_dir.path().join("fmwdoc.toml"),
        "[scan]\nextensions = []\n",
    )
    .unwrap();

    fmwdoc()
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[CONFIG_ERROR] ConfigError: scan.extensions"))
        .stderr(predicate::str::contains("Hint: Fix the setting in fmwdoc.toml"));

    assert!(!temp_dir.path().join("treefarm_documentation.md").exists());
}

#[test]
fn test_log_file_is_written_when_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let input = workspace_with_fixture(temp_dir.path());

    fmwdoc()
        .arg(&input)
        .arg("--verbose")
        .env("FMWDOC_LOG_FILE", "1")
        .assert()
        .success();

    let log = fs::read_to_string(temp_dir.path().join(".fmwdoc/logs/fmwdoc.log")).unwrap();
    assert!(log.contains("parsed workflow"));
}

#[test]
fn test_quiet_keeps_stderr_clean() {
    let temp_dir = TempDir::new().unwrap();
    let input = workspace_with_fixture(temp_dir.path());

    fmwdoc()
        .arg(&input)
        .arg("--quiet")
        .env("RUST_LOG", "debug")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_help_lists_arguments_and_options() {
    fmwdoc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ARGUMENTS:"))
        .stdout(predicate::str::contains("OPTIONS:"))
        .stdout(predicate::str::contains("--config <FILE>"));
}

#[test]
fn test_version_flag() {
    fmwdoc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(fmwdoc::VERSION));
}
