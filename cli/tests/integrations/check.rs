use crate::fake_solver::script;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_check_valid_program() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("ok.lp");
    fs::write(&file, "a.\n").unwrap();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("check").arg(&file).arg("--solver").arg(script("sat.sh"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK: 1 file(s)"));
}

#[test]
fn test_cli_check_reports_solver_error() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("broken.lp");
    fs::write(&file, "a :- .\n").unwrap();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("check")
        .arg(&file)
        .arg("--solver")
        .arg(script("syntax_error.sh"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("exit code 65"))
        .stderr(predicate::str::contains("syntax error"));
}

#[test]
fn test_cli_check_missing_file() {
    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("check")
        .arg("/nonexistent/program.lp")
        .arg("--solver")
        .arg(script("sat.sh"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}
