use crate::fake_solver::script;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn program_file(temp_dir: &TempDir) -> std::path::PathBuf {
    let file = temp_dir.path().join("graph.lp");
    fs::write(&file, "node(1..2). edge(1,2).\n").unwrap();
    file
}

#[test]
fn test_cli_ground_lists_atoms() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("ground")
        .arg(program_file(&temp_dir))
        .arg("--solver")
        .arg(script("ground.sh"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("3 ground atom(s)"))
        .stdout(predicate::str::contains("edge(1,2)"));
}

#[test]
fn test_cli_ground_filters_by_predicate() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("ground")
        .arg(program_file(&temp_dir))
        .arg("--solver")
        .arg(script("ground.sh"))
        .arg("-p")
        .arg("node");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("2 ground atom(s) of node"))
        .stdout(predicate::str::contains("edge").not());
}

#[test]
fn test_cli_ground_json() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("ground")
        .arg(program_file(&temp_dir))
        .arg("--solver")
        .arg(script("ground.sh"))
        .arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["atoms"].as_array().unwrap().len(), 3);
    assert!(json.get("predicate").is_none());
}
