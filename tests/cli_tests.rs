//! Integration tests for the `sanitext` binary.
//!
//! Each test runs the built binary with `RUST_LOG=off` so stderr only
//! carries command output.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

fn sanitext() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sanitext"));
    cmd.env("RUST_LOG", "off");
    // Keep a developer's ./sanitext.toml out of the tests
    cmd.current_dir(env!("CARGO_TARGET_TMPDIR"));
    cmd
}

fn run(args: &[&str]) -> Output {
    sanitext().args(args).output().expect("failed to run sanitext")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = sanitext()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn sanitext");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for sanitext")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_config(dir: &Path, content: &str) -> String {
    let path = dir.join("sanitext.toml");
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

// =============================================================================
// Single Values
// =============================================================================

#[test]
fn test_single_value_commands() {
    let cases: &[(&[&str], &str)] = &[
        (&["string", "Hello\t<World>  !"], "Hello World !\n"),
        (&["hostname", " example.com "], "example.com\n"),
        (&["extension", "TXT"], ".txt\n"),
        (&["file-name", "My Report (v2).PDF"], "MyReportv2.pdf\n"),
        (&["dir-name", ".config"], "dir_config\n"),
        (&["path", "uploads/../docs/a.txt"], "docs/a.txt\n"),
        (&["url", "https://example.com/a?b=c"], "https://example.com/a?b=c\n"),
        (&["has-ext", "archive.tar.gz"], "true\n"),
        (&["has-ext", ".bashrc"], "false\n"),
        (&["content-type", "photo.JPG"], "image/jpeg\n"),
    ];

    for (args, expected) in cases {
        let output = run(args);
        assert_eq!(output.status.code(), Some(0), "{args:?}: {}", stderr(&output));
        assert_eq!(stdout(&output), *expected, "{args:?}");
    }
}

#[test]
fn test_rejected_value_exits_one() {
    let output = run(&["file-name", "CON.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("reserved device name"));
}

#[test]
fn test_path_allow_nav_flag() {
    let output = run(&["path", "--allow-nav", "./a/../b.txt"]);
    assert_eq!(stdout(&output), "./b.txt\n");

    let output = run(&["path", "./a/../b.txt"]);
    assert_eq!(stdout(&output), "b.txt\n");
}

#[test]
fn test_path_reports_dropped_components() {
    let output = run(&["path", "docs/<>/notes.txt"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "docs/notes.txt\n");
    assert!(stderr(&output).contains("dropped component #1"));
}

#[test]
fn test_url_no_protocol_flag() {
    let output = run(&["url", "example.com"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("protocol"));

    let output = run(&["url", "--no-protocol", "example.com"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "example.com\n");
}

#[test]
fn test_json_output() {
    let output = run(&["--json", "path", "a/<>/b"]);
    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(value["input"], "a/<>/b");
    assert_eq!(value["output"], "a/b/");
    assert_eq!(value["dropped"][0]["index"], 1);

    let output = run(&["file-name", "--json", "<>"]);
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(value["error_kind"], "empty_sanitized_value");
}

// =============================================================================
// Batch
// =============================================================================

#[test]
fn test_batch_from_stdin() {
    let output = run_with_stdin(
        &["batch", "--kind", "file-name"],
        "report.PDF\n\nnotes<1>.txt\n",
    );
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(stdout(&output), "report.pdf\nnotes1.txt\n");
    assert!(stderr(&output).contains("2 values: 2 accepted, 0 rejected"));
}

#[test]
fn test_batch_from_file_with_failures() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("hosts.txt");
    fs::write(&input, "example.com\nbad host\nlocalhost\n").unwrap();

    let output = run(&["batch", "--kind", "hostname", "--input", input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "example.com\nlocalhost\n");
    assert!(stderr(&output).contains("3 values: 2 accepted, 1 rejected"));
}

#[test]
fn test_batch_json_lines() {
    let output = run_with_stdin(
        &["--json", "batch", "--kind", "url", "--no-protocol"],
        "example.com\nhttps://x.org/a\n",
    );
    assert_eq!(output.status.code(), Some(0));
    let lines: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["output"], "https://x.org/a");
}

#[test]
fn test_batch_missing_input_file() {
    let output = run(&["batch", "--kind", "string", "--input", "/nonexistent/values.txt"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to open input file"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_relaxes_policies() {
    let dir = tempdir().unwrap();
    let config = write_config(
        dir.path(),
        "[path]\nallow_navigation = true\n\n[url]\nrequire_protocol = false\n",
    );

    let output = run(&["--config", &config, "url", "example.com"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "example.com\n");

    let output = run(&["--config", &config, "path", "./a"]);
    assert_eq!(stdout(&output), "./a/\n");
}

#[test]
fn test_config_invalid_log_level() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "[log]\nlevel = \"loud\"\n");

    let output = run(&["--config", &config, "string", "x"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid log level"));
}

#[test]
fn test_config_missing_file() {
    let output = run(&["--config", "/nonexistent/sanitext.toml", "string", "x"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read config file"));
}

#[test]
fn test_usage_error_exits_two() {
    let output = run(&["batch"]);
    assert_eq!(output.status.code(), Some(2));
}
