//! Integration tests for the PassVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Master passwords come from `PASSVAULT_PASSWORD` so nothing prompts;
//! entry passwords use `--generate` for the same reason.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the passvault binary.
fn passvault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("passvault").expect("binary should exist")
}

/// Helper: a temp dir with a fast-KDF config file.
fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child(".passvault.toml")
        .write_str("kdf_memory_kib = 8192\n")
        .unwrap();
    tmp
}

/// Helper: run the binary inside `dir` with the master password set.
fn run_in(dir: &TempDir, password: &str) -> Command {
    let mut cmd = passvault();
    cmd.current_dir(dir.path())
        .env("PASSVAULT_PASSWORD", password)
        .env_remove("PASSVAULT_NEW_PASSWORD");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    passvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("passwd"))
        .stdout(predicate::str::contains("due"));
}

#[test]
fn version_flag_shows_version() {
    passvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}

#[test]
fn no_args_shows_help() {
    passvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn init_creates_vault_file() {
    let tmp = workspace();

    run_in(&tmp, "master-password")
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault created"));

    tmp.child("passwords.pvlt").assert(predicate::path::exists());
}

#[test]
fn init_refuses_to_overwrite() {
    let tmp = workspace();
    run_in(&tmp, "master-password").arg("init").assert().success();

    run_in(&tmp, "master-password")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_short_password() {
    let tmp = workspace();
    run_in(&tmp, "short").arg("init").assert().failure();
    tmp.child("passwords.pvlt").assert(predicate::path::missing());
}

#[test]
fn add_list_and_get_round_trip() {
    let tmp = workspace();
    run_in(&tmp, "master-password").arg("init").assert().success();

    run_in(&tmp, "master-password")
        .args(["add", "Bank", "--user", "alice", "--generate"])
        .assert()
        .success();

    run_in(&tmp, "master-password")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank"))
        .stdout(predicate::str::contains("alice"));

    run_in(&tmp, "master-password")
        .args(["get", "Bank", "--field", "user"])
        .assert()
        .success()
        .stdout("alice\n");

    // Generated passwords use the default length of 20.
    run_in(&tmp, "master-password")
        .args(["get", "Bank"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^.{20}\n$").unwrap());
}

#[test]
fn wrong_master_password_fails() {
    let tmp = workspace();
    run_in(&tmp, "master-password").arg("init").assert().success();

    run_in(&tmp, "not-the-password")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wrong password"));
}

#[test]
fn duplicate_title_is_rejected() {
    let tmp = workspace();
    run_in(&tmp, "master-password").arg("init").assert().success();
    run_in(&tmp, "master-password")
        .args(["add", "Bank", "--generate"])
        .assert()
        .success();

    run_in(&tmp, "master-password")
        .args(["add", "Bank", "--generate"])
        .assert()
        .failure();
}

#[test]
fn delete_with_force_removes_entry() {
    let tmp = workspace();
    run_in(&tmp, "master-password").arg("init").assert().success();
    run_in(&tmp, "master-password")
        .args(["add", "Bank", "--generate"])
        .assert()
        .success();

    run_in(&tmp, "master-password")
        .args(["delete", "Bank", "--force"])
        .assert()
        .success();

    run_in(&tmp, "master-password")
        .args(["get", "Bank"])
        .assert()
        .failure();
}

#[test]
fn passwd_switches_master_password() {
    let tmp = workspace();
    run_in(&tmp, "master-password").arg("init").assert().success();

    run_in(&tmp, "master-password")
        .arg("passwd")
        .env("PASSVAULT_NEW_PASSWORD", "another-password")
        .assert()
        .success();

    run_in(&tmp, "master-password").arg("list").assert().failure();
    run_in(&tmp, "another-password").arg("list").assert().success();
}

#[test]
fn vault_flag_selects_file() {
    let tmp = workspace();
    let custom = tmp.child("work.pvlt");

    run_in(&tmp, "master-password")
        .args(["init", "--vault", custom.path().to_str().unwrap()])
        .assert()
        .success();

    custom.assert(predicate::path::exists());
    tmp.child("passwords.pvlt").assert(predicate::path::missing());
}

#[test]
fn generate_respects_length_and_classes() {
    let tmp = workspace();
    run_in(&tmp, "unused")
        .args(["generate", "--length", "12", "--no-symbols", "--no-digits"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[a-zA-Z]{12}\n$").unwrap());
}

#[test]
fn completions_bash_mentions_binary() {
    passvault()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}
