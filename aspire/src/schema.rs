//! Static schema descriptors
//!
//! A schema names a predicate and lists its fields in order. The same
//! descriptor drives rendering (field order) and decoding (field typing), so
//! an atom always reads back the way it was written.

use crate::atom::{Atom, AtomBuilder};
use crate::term::Term;
use crate::{AspError, AspResult};
use regex::Regex;
use std::sync::{Arc, OnceLock};

/// The type of a schema field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Int,
    Str,
    Bool,
    /// Wildcard: accepts any term, decoded as string, integer, boolean or symbol
    Any,
    /// A nested atom of the given schema
    Atom(Arc<Schema>),
    /// A value fixed by the schema; carried on every atom but never rendered
    Constant(Term),
}

impl FieldKind {
    pub fn is_constant(&self) -> bool {
        matches!(self, FieldKind::Constant(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Int => "integer",
            FieldKind::Str => "string",
            FieldKind::Bool => "boolean",
            FieldKind::Any => "any",
            FieldKind::Atom(_) => "atom",
            FieldKind::Constant(_) => "constant",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

/// Predicate name plus ordered, typed fields
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    predicate: String,
    fields: Vec<FieldDescriptor>,
}

fn predicate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][A-Za-z0-9_']*$").expect("valid predicate regex"))
}

impl Schema {
    pub fn builder(predicate: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            predicate: predicate.into(),
            fields: Vec::new(),
        }
    }

    /// Derive the predicate from a type name: `WeightedClause` becomes `weightedClause`
    pub fn from_type_name(type_name: &str) -> SchemaBuilder {
        let mut chars = type_name.chars();
        let predicate = match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        };
        Self::builder(predicate)
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Number of fields that appear in rendered text
    pub fn arity(&self) -> usize {
        self.fields.iter().filter(|f| !f.kind.is_constant()).count()
    }

    pub fn atom(self: &Arc<Self>) -> AtomBuilder {
        AtomBuilder::new(Arc::clone(self))
    }

    /// An atom whose every field is a fresh variable
    pub fn any(self: &Arc<Self>) -> Atom {
        Atom::unbound(Arc::clone(self))
    }
}

pub struct SchemaBuilder {
    predicate: String,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn build(self) -> AspResult<Arc<Schema>> {
        if !predicate_pattern().is_match(&self.predicate) {
            return Err(AspError::construction(format!(
                "Invalid predicate name '{}': must start with a lowercase letter",
                self.predicate
            )));
        }
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(AspError::construction(format!(
                    "Field {} of '{}' has an empty name",
                    i, self.predicate
                )));
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(AspError::construction(format!(
                    "Duplicate field '{}' in '{}'",
                    field.name, self.predicate
                )));
            }
        }
        Ok(Arc::new(Schema {
            predicate: self.predicate,
            fields: self.fields,
        }))
    }
}
