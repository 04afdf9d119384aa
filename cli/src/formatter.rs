use aspire::{Answer, SolveResult, Status};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use serde::Serialize;

/// Atoms of a ground program, optionally restricted to one predicate
#[derive(Debug, Serialize)]
pub struct GroundReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    pub atoms: Vec<String>,
}

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_solve_result(&self, result: &SolveResult) -> String {
        let mut output = format!("{}\n", status_line(result));
        for (idx, answer) in result.answers.iter().enumerate() {
            output.push('\n');
            output.push_str(&self.format_answer(idx + 1, answer));
            output.push('\n');
        }
        output
    }

    fn format_answer(&self, number: usize, answer: &Answer) -> String {
        let mut title = format!("Answer {}", number);
        if !answer.costs().is_empty() {
            let costs: Vec<String> = answer.costs().iter().map(i64::to_string).collect();
            title.push_str(&format!(" (costs: {})", costs.join(" ")));
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Predicate").set_alignment(CellAlignment::Left),
            Cell::new("Atom").set_alignment(CellAlignment::Left),
        ]));
        for atom in answer.atoms() {
            table.add_row(Row::from(vec![predicate_of(atom), atom.as_str()]));
        }

        format!("{}\n{}", title, table)
    }

    pub fn format_ground_report(&self, report: &GroundReport) -> String {
        let mut output = match &report.predicate {
            Some(predicate) => format!("{} ground atom(s) of {}\n", report.atoms.len(), predicate),
            None => format!("{} ground atom(s)\n", report.atoms.len()),
        };
        for atom in &report.atoms {
            output.push_str(&format!("  {}\n", atom));
        }
        output
    }
}

fn status_line(result: &SolveResult) -> &'static str {
    match result.status {
        Status::NoSolution => "UNSATISFIABLE",
        Status::HasSolution if result.answers.iter().any(Answer::is_optimal) => "OPTIMUM FOUND",
        Status::HasSolution => "SATISFIABLE",
        Status::Unknown if result.killed => "UNKNOWN (timed out)",
        Status::Unknown => "UNKNOWN",
    }
}

fn predicate_of(atom: &str) -> &str {
    atom.split('(').next().unwrap_or(atom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines() {
        let unsat = SolveResult::parse(r#"{"Result": "UNSATISFIABLE", "Call": []}"#).unwrap();
        assert_eq!(status_line(&unsat), "UNSATISFIABLE");
        assert_eq!(status_line(&SolveResult::killed()), "UNKNOWN (timed out)");

        let optimum = SolveResult::parse(
            r#"{"Result": "OPTIMUM FOUND", "Call": [{"Witnesses": [{"Value": ["a"], "Costs": [3]}]}]}"#,
        )
        .unwrap();
        assert_eq!(status_line(&optimum), "OPTIMUM FOUND");
    }

    #[test]
    fn test_answer_table_lists_atoms_with_predicates() {
        let result = SolveResult::parse(
            r#"{"Result": "SATISFIABLE", "Call": [{"Witnesses": [{"Value": ["node(1)", "done"], "Costs": [4, 0]}]}]}"#,
        )
        .unwrap();
        let output = Formatter::default().format_solve_result(&result);

        assert!(output.starts_with("SATISFIABLE\n"));
        assert!(output.contains("Answer 1 (costs: 4 0)"));
        assert!(output.contains("node(1)"));
        assert!(output.contains("done"));
        assert!(output.contains("Predicate"));
    }

    #[test]
    fn test_ground_report() {
        let report = GroundReport {
            predicate: Some("node".to_string()),
            atoms: vec!["node(1)".to_string(), "node(2)".to_string()],
        };
        let output = Formatter::default().format_ground_report(&report);
        assert_eq!(output, "2 ground atom(s) of node\n  node(1)\n  node(2)\n");
    }

    #[test]
    fn test_predicate_of() {
        assert_eq!(predicate_of("edge(1,2)"), "edge");
        assert_eq!(predicate_of("done"), "done");
    }
}
