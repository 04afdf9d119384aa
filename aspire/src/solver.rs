use crate::atom::Atom;
use crate::config::SolverConfig;
use crate::process::{ProcessOutput, SolverProcess};
use crate::program::Program;
use crate::result::{SolveResult, Status};
use crate::schema::Schema;
use crate::{AspError, AspResult};
use std::sync::Arc;
use std::time::Duration;

/// Output-format flag the solver wrapper sets itself
pub const RESERVED_OPTION: &str = "--outf";

const SOLVE_OPTIONS: [&str; 2] = ["--outf=2", "--quiet=0,1"];

/// Runs programs through the configured solver executable
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Run the solver on `text` with exactly the given options
    pub fn run(
        &self,
        text: &str,
        options: &[String],
        timeout: Option<Duration>,
    ) -> AspResult<ProcessOutput> {
        SolverProcess::new(&self.config, text, options)?
            .with_timeout(timeout)
            .run()
    }

    pub fn solve(
        &self,
        program: &Program,
        options: &[String],
        timeout: Option<Duration>,
    ) -> AspResult<SolveResult> {
        self.solve_text(&program.render()?, options, timeout)
    }

    /// Solve program text and parse the JSON result
    ///
    /// A run cut short by `timeout` comes back as [`Status::Unknown`] with
    /// `killed` set. Whatever it printed is discarded.
    pub fn solve_text(
        &self,
        text: &str,
        options: &[String],
        timeout: Option<Duration>,
    ) -> AspResult<SolveResult> {
        validate_options(options)?;
        let mut options = options.to_vec();
        options.extend(SOLVE_OPTIONS.iter().map(|option| option.to_string()));

        let output = self.run(text, &options, timeout)?;
        if output.killed {
            return Ok(SolveResult::killed());
        }
        let warning = output.check()?;
        Ok(SolveResult::parse(&output.stdout)?.with_warning(warning))
    }

    /// Parse and ground `text` without solving, returning any warning
    pub fn check_text(&self, text: &str) -> AspResult<Option<String>> {
        self.run(text, &["--text".to_string()], None)?.check()
    }

    /// The atom table of the ground program
    pub fn ground_atoms(&self, text: &str) -> AspResult<Vec<String>> {
        let output = self.run(text, &["--output=smodels".to_string()], None)?;
        output.check()?;
        Ok(parse_symbol_table(&output.stdout))
    }

    /// Solve a facts-only program and decode the atoms of each schema
    ///
    /// The program must have exactly one answer. Atoms come back grouped by
    /// schema, in the order the schemas are given.
    pub fn load_facts(&self, text: &str, schemas: &[Arc<Schema>]) -> AspResult<Vec<Atom>> {
        let result = self.solve_text(text, &[], None)?;
        if result.status != Status::HasSolution {
            return Err(AspError::Output(format!(
                "facts did not load: solver status is {:?}",
                result.status
            )));
        }
        let [answer] = result.answers.as_slice() else {
            return Err(AspError::Output(format!(
                "facts must have exactly one answer, got {}",
                result.answers.len()
            )));
        };

        let mut atoms = Vec::new();
        for schema in schemas {
            atoms.extend(answer.atom_occurrences(schema)?);
        }
        Ok(atoms)
    }
}

/// Reject options that would override the output format
pub fn validate_options(options: &[String]) -> AspResult<()> {
    match options.iter().find(|option| option.contains(RESERVED_OPTION)) {
        Some(option) => Err(AspError::construction(format!(
            "Option '{}' is reserved: the output format is always JSON",
            option
        ))),
        None => Ok(()),
    }
}

/// Atom names from smodels output: the lines between the first two `0` lines,
/// each `<id> <atom>`
pub fn parse_symbol_table(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip_while(|line| *line != "0")
        .skip(1)
        .take_while(|line| *line != "0")
        .filter_map(|line| line.split_once(' ').map(|(_, atom)| atom.to_string()))
        .collect()
}
