//! Integration tests for the CLI boundary.
//!
//! These invoke the built binary and only exercise argument handling, which
//! fails or exits before any browser is launched, so they run without
//! Chromium or a page server.

use std::path::PathBuf;
use std::process::Command;

/// Path to the editor-verify binary next to the test executable.
fn binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // test binary name
    path.pop(); // deps
    path.push("editor-verify");
    path
}

fn run(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(binary())
        .args(args)
        .output()
        .expect("failed to execute editor-verify");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (output.status.success(), stdout, stderr)
}

#[test]
fn rejects_relative_url_before_launching_anything() {
    let (success, _stdout, stderr) = run(&["--url", "EditorMain.html"]);

    assert!(!success, "expected failure for a relative URL");
    assert!(
        stderr.contains("--url"),
        "expected the error to name the flag, got: {stderr}"
    );
}

#[test]
fn rejects_unknown_flags() {
    let (success, _stdout, stderr) = run(&["--screenshots", "out"]);

    assert!(!success, "expected failure for an unknown flag");
    assert!(
        stderr.contains("--screenshots"),
        "expected the error to echo the offending flag, got: {stderr}"
    );
}

#[test]
fn help_lists_the_run_options() {
    let (success, stdout, _stderr) = run(&["--help"]);

    assert!(success, "--help must exit zero");
    for flag in ["--url", "--output-dir", "--headed", "--verbose"] {
        assert!(stdout.contains(flag), "help output missing {flag}");
    }
}
