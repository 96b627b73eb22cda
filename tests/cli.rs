use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn sorrel_eval_prints_the_value() {
    let mut cmd = Command::cargo_bin("sorrel").expect("binary exists");
    cmd.arg("eval").arg("(+ 1 2 3)");
    cmd.assert().success().stdout(predicate::str::contains("6"));
}

#[test]
fn sorrel_run_quickstart() {
    let mut cmd = Command::cargo_bin("sorrel").expect("binary exists");
    cmd.arg("run").arg("demos/quickstart.sl");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("42"));
}

#[test]
fn sorrel_run_closure_demo() {
    let mut cmd = Command::cargo_bin("sorrel").expect("binary exists");
    cmd.arg("run").arg("demos/closures.sl");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("15"));
}

#[test]
fn sorrel_run_reports_unbound_symbols() {
    let dir = tempdir().expect("create temp dir");
    let script = dir.path().join("broken.sl");
    fs::write(&script, "(+ 1 nope)\n").expect("write script");

    let mut cmd = Command::cargo_bin("sorrel").expect("binary exists");
    cmd.arg("run").arg(&script);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("undefined symbol"));
}

#[test]
fn sorrel_eval_rejects_trailing_input() {
    let mut cmd = Command::cargo_bin("sorrel").expect("binary exists");
    cmd.arg("eval").arg("(+ 1 2) junk");
    cmd.assert().failure();
}
