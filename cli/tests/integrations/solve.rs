use crate::fake_solver::script;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn program_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("graph.lp"), "node(1..2).\n").unwrap();
    fs::write(temp_dir.path().join("colors.lp"), "color(\"red\").\n").unwrap();
    temp_dir
}

#[test]
fn test_cli_solve_prints_answers() {
    let temp_dir = program_dir();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("solve")
        .arg("--dir")
        .arg(temp_dir.path())
        .arg("--solver")
        .arg(script("sat.sh"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("SATISFIABLE"))
        .stdout(predicate::str::contains("Answer 1"))
        .stdout(predicate::str::contains("node(1)"))
        .stdout(predicate::str::contains("color(\"red\")"));
}

#[test]
fn test_cli_solve_passes_options() {
    let temp_dir = program_dir();
    let args_file = temp_dir.path().join("args.txt");

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.env("ARGS_FILE", &args_file)
        .arg("solve")
        .arg(temp_dir.path().join("graph.lp"))
        .arg("--solver")
        .arg(script("sat.sh"))
        .arg("--models")
        .arg("0")
        .arg("-o")
        .arg("--opt-mode=optN");

    cmd.assert().success();

    let args = fs::read_to_string(&args_file).unwrap();
    assert!(args.starts_with("--opt-mode=optN --models=0 --outf=2 --quiet=0,1 "));
}

#[test]
fn test_cli_solve_json_output() {
    let temp_dir = program_dir();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("solve")
        .arg("-d")
        .arg(temp_dir.path())
        .arg("--solver")
        .arg(script("optimum.sh"))
        .arg("--json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["status"], "has_solution");
    assert_eq!(json["killed"], false);
    assert_eq!(json["answers"][1]["atoms"][0], "pick(1)");
    assert_eq!(json["answers"][1]["optimal"], true);
}

#[test]
fn test_cli_solve_optimum_shows_costs() {
    let temp_dir = program_dir();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("solve")
        .arg("-d")
        .arg(temp_dir.path())
        .arg("--solver")
        .arg(script("optimum.sh"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("OPTIMUM FOUND"))
        .stdout(predicate::str::contains("Answer 2 (costs: 2)"));
}

#[test]
fn test_cli_solve_unsatisfiable() {
    let temp_dir = program_dir();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("solve")
        .arg("-d")
        .arg(temp_dir.path())
        .arg("--solver")
        .arg(script("unsat.sh"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("UNSATISFIABLE"))
        .stdout(predicate::str::contains("Answer").not());
}

#[test]
fn test_cli_solve_timeout() {
    let temp_dir = program_dir();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("solve")
        .arg("-d")
        .arg(temp_dir.path())
        .arg("--solver")
        .arg(script("slow.sh"))
        .arg("--timeout")
        .arg("1");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("UNKNOWN (timed out)"));
}

#[test]
fn test_cli_solve_rejects_output_format_option() {
    let temp_dir = program_dir();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("solve")
        .arg("-d")
        .arg(temp_dir.path())
        .arg("--solver")
        .arg(script("sat.sh"))
        .arg("-o")
        .arg("--outf=0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("reserved"));
}

#[test]
fn test_cli_solve_without_program_fails() {
    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("solve").arg("--solver").arg(script("sat.sh"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No program given"));
}

#[test]
fn test_cli_solve_empty_directory_fails() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("aspire").unwrap();
    cmd.arg("solve")
        .arg("-d")
        .arg(temp_dir.path())
        .arg("--solver")
        .arg(script("sat.sh"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No .lp files found"));
}
