//! Integration tests for linestats CLI

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::tempdir;

fn run_linestats(args: &[&str], stdin: &str) -> (String, String, bool) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_linestats"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait on command");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (stdout, stderr, output.status.success())
}

const TIMINGS: &str = "req took 10ms\nreq took 20ms\nreq took 30ms\n";

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_linestats(&["--help"], "");

    assert!(success);
    assert!(stdout.contains("linestats"));
    assert!(stdout.contains("--trim-outliers"));
    assert!(stdout.contains("--skip"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--suppress-invariant"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_linestats(&["--version"], "");

    assert!(success);
    assert!(stdout.contains("linestats"));
}

#[test]
fn test_stdin_text_output() {
    let (stdout, _, success) = run_linestats(&[], TIMINGS);

    assert!(success);
    assert_eq!(stdout, "req took 10-30(20.000000+/-8.2)ms\n");
}

#[test]
fn test_dash_reads_stdin() {
    let (stdout, _, success) = run_linestats(&["-"], TIMINGS);

    assert!(success);
    assert_eq!(stdout, "req took 10-30(20.000000+/-8.2)ms\n");
}

#[test]
fn test_repeated_line_unchanged() {
    let (stdout, _, success) = run_linestats(&[], &"code 200 ok\n".repeat(5));

    assert!(success);
    assert_eq!(stdout, "code 200 ok\n");
}

#[test]
fn test_suppress_invariant_and_count() {
    let input = format!("{TIMINGS}static line\n");
    let (stdout, _, success) = run_linestats(&["-u", "-n"], &input);

    assert!(success);
    assert_eq!(stdout, "req took 10-30(20.000000+/-8.2)ms (3)\n");
}

#[test]
fn test_trim_outliers() {
    let input = "t 1\nt 10\nt 12\nt 14\nt 1000\n";
    let (stdout, _, success) = run_linestats(&["--trim-outliers"], input);

    assert!(success);
    assert_eq!(stdout, "t 1-1000(12.000000+/-1.6)\n");
}

#[test]
fn test_skip() {
    let input = "job 7 took 5s\njob 7 took 9s\n";
    let (stdout, _, success) = run_linestats(&["--skip", "1"], input);

    assert!(success);
    assert_eq!(stdout, "job 7 took 5-9(7.000000+/-2.0)s\n");
}

#[test]
fn test_csv_output() {
    let input = "a=2 b=9\na=1 b=8\n";
    let (stdout, _, success) = run_linestats(&["--csv"], input);

    assert!(success);
    assert_eq!(stdout, "\"a=[1] b=[2]\"\n2,9\n1,8\n");
}

#[test]
fn test_json_output() {
    let (stdout, _, success) = run_linestats(&["--output", "json"], TIMINGS);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed[0]["source"], "<stdin>");
    assert_eq!(parsed[0]["lines"], 3);
    let template = &parsed[0]["templates"][0];
    assert_eq!(template["count"], 3);
    assert_eq!(template["segments"][1]["stats"]["min"], 10);
    assert_eq!(template["segments"][1]["stats"]["max"], 30);
    assert_eq!(template["rows"][2][0], 30);
}

#[test]
fn test_multiple_files_are_independent() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.log");
    let b = dir.path().join("b.log");
    fs::write(&a, "x 1\nx 3\n").unwrap();
    fs::write(&b, "x 5\nx 5\n").unwrap();

    let a = a.to_string_lossy().to_string();
    let b = b.to_string_lossy().to_string();
    let (stdout, _, success) = run_linestats(&[&a, &b], "");

    assert!(success);
    assert_eq!(
        stdout,
        format!("==> {a} <==\nx 1-3(2.000000+/-1.0)\n\n==> {b} <==\nx 5\n")
    );
}

#[test]
fn test_csv_multiple_files_have_headers() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.log");
    let b = dir.path().join("b.log");
    fs::write(&a, "x 1\nx 3\n").unwrap();
    fs::write(&b, "y 2\n").unwrap();

    let a = a.to_string_lossy().to_string();
    let b = b.to_string_lossy().to_string();
    let (stdout, _, success) = run_linestats(&["--csv", &a, &b], "");

    assert!(success);
    assert_eq!(
        stdout,
        format!("==> {a} <==\n\"x [1]\"\n1\n3\n\n==> {b} <==\n\"y 2\"\n")
    );
}

#[test]
fn test_json_has_no_text_headers() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.log");
    fs::write(&a, "x 1\nx 3\n").unwrap();
    let a = a.to_string_lossy().to_string();

    let (stdout, _, success) = run_linestats(&["-o", "json", &a, "-"], "y 2\n");

    assert!(success);
    assert!(!stdout.contains("==>"));
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[1]["source"], "<stdin>");
}

#[test]
fn test_missing_file_does_not_stop_others() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.log");
    fs::write(&good, "x 1\nx 3\n").unwrap();
    let good = good.to_string_lossy().to_string();

    let (stdout, stderr, success) = run_linestats(&["/nonexistent/path.log", &good], "");

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("/nonexistent/path.log"));
    assert!(stdout.contains("x 1-3(2.000000+/-1.0)"));
}

#[test]
fn test_malformed_number_is_reported() {
    let input = "n=99999999999999999999 x\n";
    let (stdout, stderr, success) = run_linestats(&[], input);

    assert!(success);
    assert!(stderr.contains("could not parse integer '99999999999999999999'"));
    assert_eq!(stdout, "n= x\n");
}

#[test]
fn test_invalid_output_format() {
    let (_, stderr, success) = run_linestats(&["--output", "yaml"], "");

    assert!(!success);
    assert!(stderr.contains("yaml"));
}
