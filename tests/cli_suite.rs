use assert_cmd::Command;
use predicates::prelude::*;

fn packforge() -> Command {
    Command::new(env!("CARGO_BIN_EXE_packforge"))
}

#[test]
fn test_help_command() {
    packforge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unified front-end for native Linux package managers"));
}

#[test]
fn test_version_flag() {
    let version = env!("CARGO_PKG_VERSION");
    let expected = format!("packforge {}", version);

    packforge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_install_requires_package() {
    packforge()
        .arg("install")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PACKAGE"));
}

#[test]
fn test_completions_bash() {
    packforge()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("packforge"));
}

#[test]
fn test_unknown_subcommand_fails() {
    packforge().arg("sync").assert().failure();
}

#[test]
fn test_install_help_mentions_hidden_prompt() {
    packforge()
        .args(["install", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prompt is not shown"));
}
