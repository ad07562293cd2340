//! CLI tests that run the binary without touching the network.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn tenk() -> Command {
    let mut cmd = Command::cargo_bin("tenk-rs").expect("binary builds");
    // Keep ambient credentials out of the test environment.
    cmd.env_remove("ANTHROPIC_API_KEY");
    cmd.env_remove("EDGAR_IDENTITY");
    cmd
}

#[test]
fn test_help_names_commands() {
    tenk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("models"));
}

#[test]
fn test_models_lists_known_models() {
    tenk()
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("claude-3-5-sonnet-20241022"))
        .stdout(predicate::str::contains("claude-3-5-haiku-20241022"));
}

#[test]
fn test_models_json_output() {
    tenk()
        .args(["--format", "json", "models"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"model\""));
}

#[test]
fn test_ask_without_api_key_fails() {
    tenk()
        .args(["ask", "AAPL", "2023", "What are the risks?"])
        .args(["--identity", "Jane Doe jane@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ANTHROPIC_API_KEY"));
}

#[test]
fn test_ask_without_identity_fails() {
    tenk()
        .args(["ask", "AAPL", "2023", "What are the risks?"])
        .args(["--api-key", "sk-ant-test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("EDGAR_IDENTITY"));
}

#[test]
fn test_ask_rejects_implausible_year() {
    tenk()
        .args(["ask", "AAPL", "1901", "What are the risks?"])
        .args(["--api-key", "sk-ant-test"])
        .args(["--identity", "Jane Doe jane@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1901"));
}

#[test]
fn test_ask_rejects_blank_question() {
    tenk()
        .args(["ask", "AAPL", "2023", "   "])
        .args(["--api-key", "sk-ant-test"])
        .args(["--identity", "Jane Doe jane@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("question"));
}

#[test]
fn test_ask_requires_year_to_be_numeric() {
    tenk()
        .args(["ask", "AAPL", "twenty-three", "What are the risks?"])
        .assert()
        .failure();
}
