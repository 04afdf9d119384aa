use crate::atom::{Atom, Record};
use crate::decode::{decode, matches_predicate};
use crate::schema::Schema;
use crate::{AspError, AspResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Overall outcome of a solver call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NoSolution,
    HasSolution,
    Unknown,
}

/// One answer set: the atoms true in a model, plus its optimization costs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    atoms: Vec<String>,
    costs: Vec<i64>,
    optimal: bool,
}

impl Answer {
    pub fn new(atoms: Vec<String>, costs: Vec<i64>, optimal: bool) -> Self {
        Self {
            atoms,
            costs,
            optimal,
        }
    }

    /// Atom texts exactly as the solver printed them
    pub fn atoms(&self) -> &[String] {
        &self.atoms
    }

    pub fn costs(&self) -> &[i64] {
        &self.costs
    }

    /// Set when the solver proved optimality for the run this answer came from
    pub fn is_optimal(&self) -> bool {
        self.optimal
    }

    /// Decode every atom of `schema`'s predicate in this answer
    pub fn atom_occurrences(&self, schema: &Arc<Schema>) -> AspResult<Vec<Atom>> {
        self.atoms
            .iter()
            .filter(|text| matches_predicate(schema.predicate(), text))
            .map(|text| decode(schema.predicate(), text, schema))
            .collect()
    }

    pub fn records<T: Record>(&self) -> AspResult<Vec<T>> {
        self.atom_occurrences(&T::schema())?
            .iter()
            .map(T::from_atom)
            .collect()
    }

    /// Whether a ground atom is true in this answer
    pub fn contains(&self, atom: &Atom) -> AspResult<bool> {
        Ok(self
            .atom_occurrences(atom.schema())?
            .iter()
            .any(|found| found == atom))
    }
}

/// The parsed result of a solve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult {
    pub status: Status,
    pub answers: Vec<Answer>,
    /// The run hit its timeout and was terminated; nothing was parsed
    pub killed: bool,
    /// Non-fatal diagnostics the solver wrote to stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Result")]
    result: String,
    #[serde(rename = "Call", default)]
    calls: Vec<Call>,
}

#[derive(Debug, Deserialize)]
struct Call {
    #[serde(rename = "Witnesses", default)]
    witnesses: Vec<Witness>,
}

#[derive(Debug, Deserialize)]
struct Witness {
    #[serde(rename = "Value")]
    value: Option<Vec<String>>,
    #[serde(rename = "Costs", default)]
    costs: Vec<i64>,
}

impl SolveResult {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            answers: Vec::new(),
            killed: false,
            warning: None,
        }
    }

    pub fn killed() -> Self {
        Self {
            killed: true,
            ..Self::new(Status::Unknown)
        }
    }

    /// Parse the solver's JSON output (`--outf=2`)
    pub fn parse(stdout: &str) -> AspResult<Self> {
        let envelope: Envelope = serde_json::from_str(stdout)?;
        let optimal = match envelope.result.as_str() {
            "UNSATISFIABLE" => return Ok(Self::new(Status::NoSolution)),
            "SATISFIABLE" => false,
            "OPTIMUM FOUND" => true,
            _ => return Ok(Self::new(Status::Unknown)),
        };

        let call = envelope
            .calls
            .into_iter()
            .next()
            .ok_or_else(|| AspError::Output("result has no solver call".to_string()))?;
        let answers = call
            .witnesses
            .into_iter()
            .filter_map(|witness| {
                witness
                    .value
                    .map(|atoms| Answer::new(atoms, witness.costs, optimal))
            })
            .collect();

        Ok(Self {
            answers,
            ..Self::new(Status::HasSolution)
        })
    }

    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        self.warning = warning;
        self
    }

    pub fn has_solution(&self) -> bool {
        self.status == Status::HasSolution
    }

    /// The last answer; when optimizing, the best one found
    pub fn best_answer(&self) -> Option<&Answer> {
        self.answers.last()
    }
}
