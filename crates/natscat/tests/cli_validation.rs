#![cfg(feature = "cli")]

use std::process::{Command, Output, Stdio};

// Nothing listens here; validation must fail before any connect attempt.
const DEAD_SERVER: &str = "nats://127.0.0.1:1";

fn natscat(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_natscat"))
        .env_remove("NATS")
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("natscat should run")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn wildcard_publish_fails_validation() {
    for subject in ["orders.*", "orders.>"] {
        let output = natscat(&["-S", DEAD_SERVER, "-s", subject, "-m", "hello"]);

        assert_eq!(output.status.code(), Some(64), "{}", stderr(&output));
        assert!(stderr(&output).contains("wildcard"));
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn missing_subject_fails_validation() {
    let output = natscat(&["-S", DEAD_SERVER, "-m", "hello"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("subject"));

    let output = natscat(&["-S", DEAD_SERVER, "-s", "", "-m", "hello"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn malformed_server_fails_validation() {
    let output = natscat(&["-S", "ftp://example:21", "-s", "orders", "-m", "hello"]);
    assert_eq!(output.status.code(), Some(64), "{}", stderr(&output));
}

#[test]
fn unreachable_server_is_a_connect_failure() {
    let output = natscat(&[
        "-S",
        DEAD_SERVER,
        "--connect-timeout",
        "2s",
        "-s",
        "orders",
        "-m",
        "hello",
    ]);

    let code = output.status.code().expect("process should exit normally");
    assert!(code == 1 || code == 124, "unexpected exit {code}");
    assert!(stderr(&output).contains("connect failed"));
    assert!(output.stdout.is_empty());
}

#[test]
fn server_can_come_from_environment() {
    let output = Command::new(env!("CARGO_BIN_EXE_natscat"))
        .env("NATS", "ftp://from-env:21")
        .args(["-s", "orders", "-m", "hello"])
        .stdin(Stdio::null())
        .output()
        .expect("natscat should run");

    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("from-env"));
}

#[test]
fn version_flag_prints_version() {
    let output = natscat(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_lists_core_flags() {
    let output = natscat(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--subject", "--listen", "--buffered", "--message", "--server", "--verbose"] {
        assert!(stdout.contains(flag), "help should mention {flag}");
    }
}
