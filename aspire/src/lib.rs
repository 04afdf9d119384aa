//! # Aspire
//!
//! **Typed answer-set programs over an external solver**
//!
//! Aspire builds logic programs for a stable-model solver such as clingo out
//! of ordinary Rust values, runs the solver as a child process and reads its
//! answers back into the same typed atoms the program was written with.
//!
//! ## Quick Start
//!
//! ```rust
//! use aspire::{AspResult, ConditionalLiteral, FieldKind, Program, Schema, Term, When};
//!
//! fn main() -> AspResult<()> {
//!     let node = Schema::builder("node").field("id", FieldKind::Int).build()?;
//!     let color = Schema::builder("color").field("name", FieldKind::Str).build()?;
//!     let assign = Schema::builder("assign")
//!         .field("node", FieldKind::Atom(node.clone()))
//!         .field("color", FieldKind::Atom(color.clone()))
//!         .build()?;
//!
//!     let mut program = Program::new();
//!     for id in 1..=3 {
//!         program.add(node.atom().with("id", id).build()?);
//!     }
//!     program.add(color.atom().with("name", "red").build()?);
//!
//!     // Every node gets exactly one color
//!     let n = node.any();
//!     let c = color.any();
//!     let choice = assign.atom().with("node", &n).with("color", &c).build()?;
//!     let options = ConditionalLiteral::new().entry(&choice, [&c]);
//!     program.add(When::new(&n).guess(options, Some(Term::from(1)), None, None)?);
//!
//!     let text = program.render()?;
//!     assert!(text.starts_with("node(1).\nnode(2).\nnode(3).\ncolor(\"red\").\n{assign("));
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Schemas and atoms
//! A [`Schema`] names a predicate and lists its typed fields. Atoms are built
//! from a schema; fields left unset are fresh variables.
//!
//! ### Rules
//! [`Guess`] renders choice rules, [`Define`] facts and (disjunctive) rules and
//! [`Assert`] hard or weak constraints. [`When`] collects a body first and
//! closes it with any of the three.
//!
//! ### Solving
//! [`Solver`] writes the rendered program to a temp file, runs the configured
//! executable under an optional timeout and parses the JSON result into a
//! [`SolveResult`]. Each [`Answer`] decodes its atoms against a schema.

pub mod aggregate;
pub mod atom;
pub mod bindings;
pub mod config;
pub mod decode;
pub mod definition;
pub mod error;
pub mod literal;
pub mod process;
pub mod program;
pub mod result;
pub mod schema;
pub mod solver;
pub mod term;

pub use aggregate::{
    Aggregate, AggregateKind, AggregateSource, ConditionalEntry, ConditionalLiteral, Element,
};
pub use atom::{Atom, AtomBuilder, Field, Record};
pub use bindings::Bindings;
pub use config::SolverConfig;
pub use decode::{decode, split_arguments};
pub use definition::{Assert, Clause, Define, Definition, Guess, GuessHead, Penalty, When};
pub use error::AspError;
pub use literal::{ComparisonOperator, Literal, LiteralKind, LiteralTarget};
pub use process::{ProcessOutput, SolverProcess};
pub use program::Program;
pub use result::{Answer, SolveResult, Status};
pub use schema::{FieldDescriptor, FieldKind, Schema, SchemaBuilder};
pub use solver::Solver;
pub use term::{Term, Variable};

/// Result type for Aspire operations
pub type AspResult<T> = Result<T, AspError>;

#[cfg(test)]
mod tests;
