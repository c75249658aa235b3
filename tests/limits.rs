use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("tri").unwrap();
    cmd.env_remove("TRI_MAX_STEPS")
        .env_remove("TRI_TIMEOUT_MS")
        .env_remove("TRI_REPL_MODE")
        .timeout(Duration::from_secs(5));
    cmd
}

fn infinite() -> &'static str {
    "+[]" // the cell stays 1, so the empty loop never exits
}

#[test]
fn max_steps_flag_aborts() {
    cargo_bin()
        .args(["run", "--max-steps", "50", infinite()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("step limit exceeded (50)"))
        .stdout(predicate::str::contains("Execution aborted").not());
}

#[test]
fn timeout_flag_aborts() {
    cargo_bin()
        .args(["run", "--timeout", "100", infinite()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("wall-clock timeout exceeded (100 ms)"));
}

#[test]
fn env_step_limit_applies_to_run() {
    cargo_bin()
        .env("TRI_MAX_STEPS", "20")
        .args(["run", infinite()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("step limit exceeded (20)"));
}

#[test]
fn flag_overrides_env() {
    cargo_bin()
        .env("TRI_MAX_STEPS", "20")
        .args(["run", "--max-steps", "30", infinite()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("step limit exceeded (30)"));
}

#[test]
fn bare_repl_reports_timeout_and_continues() {
    cargo_bin()
        .env("TRI_TIMEOUT_MS", "100")
        .write_stdin("+[]\n+++.\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Execution aborted"))
        .stdout(predicate::str::ends_with("\u{3}\n"));
}
