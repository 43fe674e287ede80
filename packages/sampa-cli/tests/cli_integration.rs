use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn sampa() -> Command {
    let mut cmd = Command::cargo_bin("sampa").unwrap();
    cmd.env_remove("SAMPA_CONFIG")
        .env_remove("SAMPA_BC3_SLOPE_DOWN")
        .env_remove("SAMPA_BC3_SLOPE_UP")
        .env_remove("SAMPA_BC3_ROUND");
    cmd
}

/// Two channels: ch0 a clean pulse, ch1 a slow excursion
fn write_sample_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(
        &path,
        "# t ch0 ch1\n\
         10.0 10.0\n\
         10.2 10.3\n\
         10.1 10.0\n\
         25.0 10.0\n\
         24.8 10.0\n",
    )
    .unwrap();
    path
}

fn stdout_json(output: &assert_cmd::assert::Assert) -> serde_json::Value {
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    serde_json::from_str(&stdout).unwrap()
}

// =============================================================================
// GENERAL
// =============================================================================

#[test]
fn test_no_args_shows_help() {
    sampa()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    sampa()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sampa"));
}

#[test]
fn test_help_flag() {
    sampa()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("slope filter"));
}

// =============================================================================
// INFO SUBCOMMAND
// =============================================================================

#[test]
fn test_info_json() {
    let output = sampa().arg("info").arg("--json").assert().success();

    let parsed = stdout_json(&output);
    assert!(parsed.get("cli_version").is_some());
    assert_eq!(parsed["default_parameters"]["round"], 0.5);
    assert_eq!(parsed["config_env_var"], "SAMPA_CONFIG");
}

// =============================================================================
// INSPECT SUBCOMMAND
// =============================================================================

#[test]
fn test_inspect_accepted_window() {
    sampa()
        .args(["inspect", "--samples", "10,10.2,10.1,25.0,24.8"])
        .args(["--slope-down", "5", "--slope-up", "5", "--round", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rising_edge"))
        .stdout(predicate::str::contains("Verdict: accepted"));
}

#[test]
fn test_inspect_rejected_window_json() {
    let output = sampa()
        .args(["inspect", "--samples", "10,10.3,10,10,10", "--json"])
        .args(["--slope-down", "5", "--slope-up", "5", "--round", "0.2"])
        .assert()
        .success();

    let parsed = stdout_json(&output);
    assert_eq!(parsed["result"]["accepted"], false);
    assert_eq!(parsed["result"]["first_flagged"], 0);
    assert_eq!(parsed["transitions"][0]["class"], "slow_rise");
}

#[test]
fn test_inspect_npoints_past_buffer() {
    sampa()
        .args(["inspect", "--samples", "1,2,3", "--npoints", "4"])
        .args(["--slope-down", "5", "--slope-up", "5", "--round", "0.5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exceeds buffer length"));
}

#[test]
fn test_inspect_bad_sample() {
    sampa()
        .args(["inspect", "--samples", "1,abc"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a number"));
}

// =============================================================================
// ENVIRONMENT AND CONFIG LOOKUP
// =============================================================================

const SLOW_EXCURSION: &str = "10,10.3,10,10,10";

#[test]
fn test_round_from_environment() {
    let output = sampa()
        .env("SAMPA_BC3_ROUND", "0.2")
        .args(["inspect", "--samples", SLOW_EXCURSION, "--json"])
        .assert()
        .success();

    let parsed = stdout_json(&output);
    assert_eq!(parsed["parameters"]["round"], 0.2);
    assert_eq!(parsed["result"]["accepted"], false);
    assert_eq!(parsed["result"]["first_flagged"], 0);
}

#[test]
fn test_flag_overrides_environment() {
    let output = sampa()
        .env("SAMPA_BC3_ROUND", "0.2")
        .args(["inspect", "--samples", SLOW_EXCURSION, "--json"])
        .args(["--round", "0.5"])
        .assert()
        .success();

    let parsed = stdout_json(&output);
    assert_eq!(parsed["parameters"]["round"], 0.5);
    assert_eq!(parsed["result"]["accepted"], true);
}

#[test]
fn test_config_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bc3.json");
    std::fs::write(&config, r#"{"slope_down": 5.0, "slope_up": 5.0, "round": 0.2}"#).unwrap();

    let output = sampa()
        .env("SAMPA_CONFIG", config.to_str().unwrap())
        .args(["inspect", "--samples", SLOW_EXCURSION, "--json"])
        .assert()
        .success();

    let parsed = stdout_json(&output);
    assert_eq!(parsed["result"]["accepted"], false);
    assert_eq!(parsed["result"]["first_flagged"], 0);

    let output = sampa()
        .env("SAMPA_CONFIG", config.to_str().unwrap())
        .args(["inspect", "--samples", SLOW_EXCURSION, "--json"])
        .args(["--round", "0.5"])
        .assert()
        .success();

    assert_eq!(stdout_json(&output)["result"]["accepted"], true);
}

#[test]
fn test_missing_config_from_environment() {
    sampa()
        .env("SAMPA_CONFIG", "/nonexistent/bc3.json")
        .args(["inspect", "--samples", SLOW_EXCURSION])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config"));
}

// =============================================================================
// VALIDATE SUBCOMMAND
// =============================================================================

#[test]
fn test_validate_nonexistent_file() {
    sampa()
        .args(["validate", "--file", "/nonexistent/window.csv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_validate_unsupported_extension() {
    let tmp = tempfile::Builder::new().suffix(".root").tempfile().unwrap();

    sampa()
        .arg("validate")
        .arg("--file")
        .arg(tmp.path().to_str().unwrap())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported"));
}

#[test]
fn test_validate_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_file(dir.path(), "window.txt");

    let output = sampa()
        .arg("validate")
        .arg("--file")
        .arg(path.to_str().unwrap())
        .arg("--json")
        .assert()
        .success();

    let parsed = stdout_json(&output);
    assert_eq!(parsed["exists"], true);
    assert_eq!(parsed["supported"], true);
    assert_eq!(parsed["channels"], 2);
    assert_eq!(parsed["time_bins"], 5);
}

// =============================================================================
// FILTER SUBCOMMAND
// =============================================================================

#[test]
fn test_filter_missing_file_arg() {
    sampa()
        .arg("filter")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--file"));
}

#[test]
fn test_filter_reports_each_channel() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_file(dir.path(), "window.txt");

    let output = sampa()
        .args(["filter", "--file", path.to_str().unwrap(), "--quiet"])
        .args(["--slope-down", "5", "--slope-up", "5", "--round", "0.2"])
        .assert()
        .success()
        .code(0);

    let parsed = stdout_json(&output);
    assert_eq!(parsed["accepted"], 1);
    assert_eq!(parsed["rejected"], 1);
    assert_eq!(parsed["channels"][0]["result"]["accepted"], true);
    assert_eq!(parsed["channels"][1]["result"]["first_flagged"], 0);
}

#[test]
fn test_filter_fail_on_reject() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_file(dir.path(), "window.txt");

    sampa()
        .args(["filter", "--file", path.to_str().unwrap(), "--quiet"])
        .args(["--round", "0.2", "--fail-on-reject"])
        .assert()
        .failure()
        .code(3);

    sampa()
        .args(["filter", "--file", path.to_str().unwrap(), "--quiet"])
        .args(["--round", "0.2", "--fail-on-reject", "--channels", "0"])
        .assert()
        .success();
}

#[test]
fn test_filter_config_file_and_condition() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_file(dir.path(), "window.txt");
    let config = dir.path().join("bc3.json");
    std::fs::write(&config, r#"{"slope_down": 5.0, "slope_up": 5.0, "round": 0.5}"#).unwrap();
    let out = dir.path().join("report.json");

    sampa()
        .args(["filter", "--file", path.to_str().unwrap(), "--quiet", "--compact"])
        .args(["--config", config.to_str().unwrap(), "--threshold", "1.0"])
        .args(["--output", out.to_str().unwrap()])
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["conditioned"], true);
    let samples = report["channels"][0]["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 5);
    assert_eq!(samples[0], 0.0);
}

#[test]
fn test_filter_unknown_channel() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_file(dir.path(), "window.txt");

    sampa()
        .args(["filter", "--file", path.to_str().unwrap(), "--quiet"])
        .args(["--channels", "7"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_filter_npoints_past_window() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_file(dir.path(), "window.txt");

    sampa()
        .args(["filter", "--file", path.to_str().unwrap(), "--quiet"])
        .args(["--npoints", "9"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("npoints"));
}

#[test]
fn test_filter_non_finite_parameter() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample_file(dir.path(), "window.txt");

    sampa()
        .args(["filter", "--file", path.to_str().unwrap(), "--quiet"])
        .args(["--round", "NaN"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("finite"));
}

// =============================================================================
// BATCH SUBCOMMAND
// =============================================================================

#[test]
fn test_batch_requires_input() {
    sampa()
        .arg("batch")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must be specified"));
}

#[test]
fn test_batch_dry_run_lists_files() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_file(dir.path(), "a.txt");
    write_sample_file(dir.path(), "b.txt");

    let pattern = format!("{}/*.txt", dir.path().to_str().unwrap());
    sampa()
        .args(["batch", "--glob", &pattern, "--dry-run", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.txt"));
}

#[test]
fn test_batch_writes_reports() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_file(dir.path(), "a.txt");
    write_sample_file(dir.path(), "b.txt");
    let out_dir = dir.path().join("reports");

    let pattern = format!("{}/*.txt", dir.path().to_str().unwrap());
    sampa()
        .args(["batch", "--glob", &pattern, "--quiet"])
        .args(["--output-dir", out_dir.to_str().unwrap()])
        .assert()
        .success();

    assert!(out_dir.join("a.txt_bc3.json").is_file());
    assert!(out_dir.join("b.txt_bc3.json").is_file());
}

#[test]
fn test_batch_partial_failure() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_sample_file(dir.path(), "good.txt");
    let bad = dir.path().join("bad.txt");
    std::fs::write(&bad, "1 2\n3 x\n").unwrap();

    let output = sampa()
        .args(["batch", "--quiet", "--continue-on-error", "--files"])
        .arg(good.to_str().unwrap())
        .arg(bad.to_str().unwrap())
        .assert()
        .failure()
        .code(4);

    // One JSONL line for the good file
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn test_batch_same_stem_keeps_both_reports() {
    let dir = tempfile::tempdir().unwrap();
    let txt = write_sample_file(dir.path(), "run.txt");
    let csv = dir.path().join("run.csv");
    std::fs::write(&csv, "10,10\n10.2,10.3\n10.1,10\n25,10\n24.8,10\n").unwrap();
    let out_dir = dir.path().join("reports");

    sampa()
        .args(["batch", "--quiet", "--round", "0.2", "--files"])
        .arg(txt.to_str().unwrap())
        .arg(csv.to_str().unwrap())
        .args(["--output-dir", out_dir.to_str().unwrap()])
        .assert()
        .success();

    assert!(out_dir.join("run.txt_bc3.json").is_file());
    assert!(out_dir.join("run.csv_bc3.json").is_file());
}

#[test]
fn test_batch_report_name_collision() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("a")).unwrap();
    std::fs::create_dir(dir.path().join("b")).unwrap();
    let first = write_sample_file(&dir.path().join("a"), "x.txt");
    let second = write_sample_file(&dir.path().join("b"), "x.txt");
    let out_dir = dir.path().join("reports");

    sampa()
        .args(["batch", "--quiet", "--files"])
        .arg(first.to_str().unwrap())
        .arg(second.to_str().unwrap())
        .args(["--output-dir", out_dir.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("would both write"));

    assert!(!out_dir.join("x.txt_bc3.json").exists());
}

#[test]
fn test_batch_stops_at_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.txt");
    std::fs::write(&bad, "1 2\n3 x\n").unwrap();
    let good = write_sample_file(dir.path(), "good.txt");

    let output = sampa()
        .args(["batch", "--quiet", "--files"])
        .arg(bad.to_str().unwrap())
        .arg(good.to_str().unwrap())
        .assert()
        .failure()
        .code(2);

    assert!(output.get_output().stdout.is_empty());
}
