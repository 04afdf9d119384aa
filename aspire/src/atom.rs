use crate::schema::{FieldKind, Schema};
use crate::term::{Term, Variable};
use crate::{AspError, AspResult};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The value held by one atom field
#[derive(Debug, Clone)]
pub enum Field {
    Term(Term),
    Atom(Atom),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Term(term) => write!(f, "{}", term),
            Field::Atom(atom) => write!(f, "{}", atom),
        }
    }
}

macro_rules! impl_field_from_term {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Field {
                fn from(value: $source) -> Self {
                    Field::Term(Term::from(value))
                }
            }
        )+
    };
}

impl_field_from_term!(Term, &Term, Variable, i64, i32, u32, bool, &str, String);

impl From<Atom> for Field {
    fn from(atom: Atom) -> Self {
        Field::Atom(atom)
    }
}

impl From<&Atom> for Field {
    fn from(atom: &Atom) -> Self {
        Field::Atom(atom.clone())
    }
}

/// A structured value: a predicate applied to fields laid out by its schema
///
/// Equality and hashing compare the rendered text, so two atoms that still
/// contain different fresh variables are not equal even when they have the
/// same shape. Compare ground atoms only.
#[derive(Debug, Clone)]
pub struct Atom {
    schema: Arc<Schema>,
    fields: Vec<Field>,
}

impl Atom {
    pub(crate) fn unbound(schema: Arc<Schema>) -> Self {
        let fields = schema
            .fields()
            .iter()
            .map(|descriptor| default_field(&descriptor.kind))
            .collect();
        Self { schema, fields }
    }

    /// Build an atom from the values of its rendered fields, in schema order
    pub fn from_values(schema: Arc<Schema>, values: Vec<Field>) -> AspResult<Self> {
        if values.len() != schema.arity() {
            return Err(AspError::construction(format!(
                "'{}' expects {} values, got {}",
                schema.predicate(),
                schema.arity(),
                values.len()
            )));
        }
        let mut values = values.into_iter();
        let mut fields = Vec::with_capacity(schema.fields().len());
        for descriptor in schema.fields() {
            match &descriptor.kind {
                FieldKind::Constant(term) => fields.push(Field::Term(term.clone())),
                kind => {
                    // Length checked above
                    let Some(value) = values.next() else { break };
                    check_kind(schema.predicate(), &descriptor.name, kind, &value)?;
                    fields.push(value);
                }
            }
        }
        Ok(Self { schema, fields })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn predicate(&self) -> &str {
        self.schema.predicate()
    }

    /// Field values in schema order, constants included
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.schema.field_index(name).map(|i| &self.fields[i])
    }

    pub fn term(&self, name: &str) -> AspResult<&Term> {
        match self.get(name) {
            Some(Field::Term(term)) => Ok(term),
            Some(Field::Atom(_)) => Err(AspError::decode(format!(
                "Field '{}' of '{}' holds an atom, not a term",
                name,
                self.predicate()
            ))),
            None => Err(self.missing(name)),
        }
    }

    pub fn int(&self, name: &str) -> AspResult<i64> {
        self.term(name)?.as_int().ok_or_else(|| self.mistyped(name, "integer"))
    }

    pub fn string(&self, name: &str) -> AspResult<&str> {
        self.term(name)?.as_str().ok_or_else(|| self.mistyped(name, "string"))
    }

    pub fn boolean(&self, name: &str) -> AspResult<bool> {
        self.term(name)?.as_bool().ok_or_else(|| self.mistyped(name, "boolean"))
    }

    pub fn nested(&self, name: &str) -> AspResult<&Atom> {
        match self.get(name) {
            Some(Field::Atom(atom)) => Ok(atom),
            Some(Field::Term(_)) => Err(self.mistyped(name, "atom")),
            None => Err(self.missing(name)),
        }
    }

    /// True when no rendered field contains a variable
    pub fn is_ground(&self) -> bool {
        self.rendered_fields().all(|field| match field {
            Field::Term(term) => term.is_bound(),
            Field::Atom(atom) => atom.is_ground(),
        })
    }

    fn rendered_fields(&self) -> impl Iterator<Item = &Field> {
        self.schema
            .fields()
            .iter()
            .zip(&self.fields)
            .filter(|(descriptor, _)| !descriptor.kind.is_constant())
            .map(|(_, field)| field)
    }

    fn missing(&self, name: &str) -> AspError {
        AspError::decode(format!("'{}' has no field '{}'", self.predicate(), name))
    }

    fn mistyped(&self, name: &str, expected: &str) -> AspError {
        AspError::decode(format!(
            "Field '{}' of '{}' is not a bound {}",
            name,
            self.predicate(),
            expected
        ))
    }
}

fn default_field(kind: &FieldKind) -> Field {
    match kind {
        FieldKind::Atom(schema) => Field::Atom(Atom::unbound(Arc::clone(schema))),
        FieldKind::Constant(term) => Field::Term(term.clone()),
        FieldKind::Int | FieldKind::Str | FieldKind::Bool | FieldKind::Any => {
            Field::Term(Term::fresh())
        }
    }
}

fn check_kind(predicate: &str, name: &str, kind: &FieldKind, value: &Field) -> AspResult<()> {
    let accepted = match (kind, value) {
        (_, Field::Term(Term::Unbound(_))) => true,
        (FieldKind::Any, _) => true,
        (FieldKind::Int, Field::Term(Term::Int(_))) => true,
        (FieldKind::Str, Field::Term(Term::Str(_))) => true,
        (FieldKind::Bool, Field::Term(Term::Bool(_))) => true,
        (FieldKind::Atom(schema), Field::Atom(atom)) => atom.predicate() == schema.predicate(),
        _ => false,
    };
    if accepted {
        return Ok(());
    }
    let found = match value {
        Field::Atom(atom) => format!("atom '{}'", atom.predicate()),
        Field::Term(term) => format!("'{}'", term),
    };
    let expected = match kind {
        FieldKind::Atom(schema) => format!("atom '{}'", schema.predicate()),
        other => other.name().to_string(),
    };
    Err(AspError::construction(format!(
        "Field '{}' of '{}' expects {}, got {}",
        name, predicate, expected, found
    )))
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.predicate())?;
        let mut fields = self.rendered_fields().peekable();
        if fields.peek().is_none() {
            return Ok(());
        }
        write!(f, "(")?;
        let mut first = true;
        for field in fields {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", field)?;
            first = false;
        }
        write!(f, ")")
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

/// Named construction of an atom; unset fields stay unbound
pub struct AtomBuilder {
    schema: Arc<Schema>,
    values: Vec<Option<Field>>,
    error: Option<AspError>,
}

impl AtomBuilder {
    pub(crate) fn new(schema: Arc<Schema>) -> Self {
        let values = vec![None; schema.fields().len()];
        Self {
            schema,
            values,
            error: None,
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<Field>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let value = value.into();
        let Some(index) = self.schema.field_index(name) else {
            self.error = Some(AspError::construction(format!(
                "'{}' has no field '{}'",
                self.schema.predicate(),
                name
            )));
            return self;
        };
        let kind = &self.schema.fields()[index].kind;
        if kind.is_constant() {
            self.error = Some(AspError::construction(format!(
                "Field '{}' of '{}' is a constant and cannot be set",
                name,
                self.schema.predicate()
            )));
            return self;
        }
        if let Err(e) = check_kind(self.schema.predicate(), name, kind, &value) {
            self.error = Some(e);
            return self;
        }
        self.values[index] = Some(value);
        self
    }

    pub fn build(self) -> AspResult<Atom> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let fields = self
            .schema
            .fields()
            .iter()
            .zip(self.values)
            .map(|(descriptor, value)| value.unwrap_or_else(|| default_field(&descriptor.kind)))
            .collect();
        Ok(Atom {
            schema: self.schema,
            fields,
        })
    }
}

/// A Rust type that maps onto one schema
///
/// Implementors convert between their own fields and [`Atom`]s, which lets an
/// answer be read back as typed values with [`crate::Answer::records`].
pub trait Record: Sized {
    fn schema() -> Arc<Schema>;

    fn from_atom(atom: &Atom) -> AspResult<Self>;

    fn to_atom(&self) -> AspResult<Atom>;
}
