use crate::solver::{parse_symbol_table, validate_options};
use crate::{AspError, ProcessOutput, SolverConfig};
use std::time::Duration;

fn output(exit_code: Option<i32>, stderr: &str) -> ProcessOutput {
    ProcessOutput {
        stdout: String::new(),
        stderr: stderr.to_string(),
        exit_code,
        killed: false,
    }
}

#[test]
fn test_reserved_output_flag_is_rejected() {
    assert!(validate_options(&["--models=0".to_string(), "-t 4".to_string()]).is_ok());

    let result = validate_options(&["--outf=0".to_string()]);
    assert!(matches!(result, Err(AspError::Construction(_))));
}

#[test]
fn test_error_exit_codes_raise() {
    for code in [1, 65] {
        let result = output(Some(code), "error: syntax error").check();
        match result {
            Err(AspError::Process { exit_code, stderr }) => {
                assert_eq!(exit_code, code);
                assert_eq!(stderr, "error: syntax error");
            }
            other => panic!("expected a process error, got {:?}", other),
        }
    }
}

#[test]
fn test_other_exit_codes_only_warn() {
    assert_eq!(output(Some(10), "").check().unwrap(), None);
    assert_eq!(
        output(Some(30), "info: atom does not occur\n").check().unwrap(),
        Some("info: atom does not occur".to_string())
    );
    assert_eq!(output(None, "").check().unwrap(), None);
}

#[test]
fn test_symbol_table_between_sentinels() {
    let smodels = "1 2 0 0\n3 1 1 0 0\n0\n2 node(1)\n3 node(2)\n4 edge(1,2)\n0\nB+\n0\nB-\n1\n0\n1\n";
    assert_eq!(
        parse_symbol_table(smodels),
        vec!["node(1)", "node(2)", "edge(1,2)"]
    );
}

#[test]
fn test_symbol_table_empty_output() {
    assert!(parse_symbol_table("").is_empty());
    assert!(parse_symbol_table("0\n0\n").is_empty());
}

#[test]
fn test_config_builders() {
    let config = SolverConfig::new()
        .with_executable("/opt/clingo")
        .with_grace_period(Duration::from_millis(50))
        .with_temp_dir("/tmp/aspire");
    assert_eq!(config.executable.to_str(), Some("/opt/clingo"));
    assert_eq!(config.grace_period, Duration::from_millis(50));
    assert_eq!(config.temp_dir.to_str(), Some("/tmp/aspire"));
    assert_eq!(SolverConfig::default().grace_period, Duration::from_secs(3));
}
