//! Reading atoms back from solver text
//!
//! The solver reports each true atom as flat text such as
//! `assign(node(1),"red")`. Decoding splits the arguments at top-level commas
//! and types each one with the schema the caller expects.

use crate::atom::{Atom, Field};
use crate::schema::{FieldKind, Schema};
use crate::term::{unescape, Term};
use crate::{AspError, AspResult};
use std::sync::Arc;

/// True when `text` is an atom of `predicate`: the name followed by `(` or nothing
pub fn matches_predicate(predicate: &str, text: &str) -> bool {
    match text.trim().strip_prefix(predicate) {
        Some(rest) => rest.is_empty() || rest.starts_with('(') || rest == ".",
        None => false,
    }
}

fn argument_text<'a>(predicate: &str, text: &'a str) -> &'a str {
    let mut inner = text.trim();
    inner = inner.strip_prefix(predicate).unwrap_or(inner);
    inner = inner.strip_suffix('.').unwrap_or(inner).trim();
    if inner.starts_with('(') && inner.ends_with(')') {
        inner = &inner[1..inner.len() - 1];
    }
    inner
}

/// Split the arguments of `text` at commas outside nested parentheses and strings
///
/// `split_arguments("p", r#"p(1,"a,b",q(2,3))"#)` yields `1`, `"a,b"` and `q(2,3)`.
pub fn split_arguments(predicate: &str, text: &str) -> Vec<String> {
    let inner = argument_text(predicate, text);
    if inner.trim().is_empty() {
        return Vec::new();
    }

    let mut arguments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for c in inner.chars() {
        if in_string {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                current.push(c);
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                arguments.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    arguments.push(current.trim().to_string());
    arguments
}

/// Rebuild an atom of `schema` from its text
///
/// The number of arguments must equal the number of non-constant fields.
pub fn decode(predicate: &str, text: &str, schema: &Arc<Schema>) -> AspResult<Atom> {
    if !matches_predicate(predicate, text) {
        return Err(AspError::decode(format!(
            "'{}' is not an atom of '{}'",
            text.trim(),
            predicate
        )));
    }
    let arguments = split_arguments(predicate, text);
    if arguments.len() != schema.arity() {
        return Err(AspError::decode(format!(
            "'{}' has {} arguments but '{}' expects {}",
            text.trim(),
            arguments.len(),
            schema.predicate(),
            schema.arity()
        )));
    }

    let kinds = schema
        .fields()
        .iter()
        .filter(|descriptor| !descriptor.kind.is_constant());
    let values = kinds
        .zip(&arguments)
        .map(|(descriptor, raw)| {
            decode_field(raw, &descriptor.kind).map_err(|e| match e {
                AspError::Decode(message) => AspError::Decode(format!(
                    "Field '{}' of '{}': {}",
                    descriptor.name,
                    schema.predicate(),
                    message
                )),
                other => other,
            })
        })
        .collect::<AspResult<Vec<_>>>()?;

    Atom::from_values(Arc::clone(schema), values)
        .map_err(|e| AspError::decode(format!("'{}': {}", text.trim(), e)))
}

fn decode_field(raw: &str, kind: &FieldKind) -> AspResult<Field> {
    let quoted = raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"');
    match kind {
        FieldKind::Atom(nested) => {
            if quoted || raw.parse::<i64>().is_ok() {
                return Err(AspError::decode(format!(
                    "expected atom '{}', got '{}'",
                    nested.predicate(),
                    raw
                )));
            }
            decode(nested.predicate(), raw, nested).map(Field::Atom)
        }
        FieldKind::Str if quoted => Ok(Field::Term(Term::Str(unescape(&raw[1..raw.len() - 1])))),
        FieldKind::Int => raw
            .parse::<i64>()
            .map(|n| Field::Term(Term::Int(n)))
            .map_err(|_| AspError::decode(format!("expected integer, got '{}'", raw))),
        FieldKind::Bool => match raw {
            "true" => Ok(Field::Term(Term::Bool(true))),
            "false" => Ok(Field::Term(Term::Bool(false))),
            _ => Err(AspError::decode(format!("expected boolean, got '{}'", raw))),
        },
        FieldKind::Any if quoted => Ok(Field::Term(Term::Str(unescape(&raw[1..raw.len() - 1])))),
        FieldKind::Any => Ok(Field::Term(match raw {
            "true" => Term::Bool(true),
            "false" => Term::Bool(false),
            _ => match raw.parse::<i64>() {
                Ok(n) => Term::Int(n),
                Err(_) => Term::Symbol(raw.to_string()),
            },
        })),
        FieldKind::Str => Err(AspError::decode(format!("expected string, got '{}'", raw))),
        FieldKind::Constant(_) => Err(AspError::decode("constant fields are not decoded")),
    }
}
