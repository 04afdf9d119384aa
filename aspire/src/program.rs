use crate::atom::Atom;
use crate::definition::Definition;
use crate::result::Answer;
use crate::schema::Schema;
use crate::solver::Solver;
use crate::AspResult;
use std::sync::Arc;

/// An ordered, append-only list of statements
///
/// Statements render in insertion order, one per line. The order carries no
/// meaning for the solver but keeps the text reproducible.
#[derive(Debug, Clone, Default)]
pub struct Program {
    definitions: Vec<Definition>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, constraint, raw statement or bare atom (added as a fact)
    pub fn add(&mut self, definition: impl Into<Definition>) -> &mut Self {
        self.definitions.push(definition.into());
        self
    }

    pub fn extend<I, D>(&mut self, definitions: I) -> &mut Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Definition>,
    {
        self.definitions
            .extend(definitions.into_iter().map(Into::into));
        self
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn render(&self) -> AspResult<String> {
        let mut text = String::new();
        for definition in &self.definitions {
            text.push_str(&definition.render()?);
            text.push('\n');
        }
        Ok(text)
    }

    /// Parse and ground the program without solving it
    ///
    /// Returns the solver's non-fatal diagnostics, if any.
    pub fn check(&self, solver: &Solver) -> AspResult<Option<String>> {
        solver.check_text(&self.render()?)
    }

    /// Every ground instance of `schema` the grounder produces
    ///
    /// This enumerates the atom's domain without searching for a model.
    pub fn possible_instances(&self, solver: &Solver, schema: &Arc<Schema>) -> AspResult<Vec<Atom>> {
        let atoms = solver.ground_atoms(&self.render()?)?;
        Answer::new(atoms, Vec::new(), false).atom_occurrences(schema)
    }
}
