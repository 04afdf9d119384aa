use crate::atom::Atom;
use crate::schema::Schema;
use crate::{AspError, AspResult};
use std::collections::HashMap;

const DEFAULT_TAG: &str = "__default__";

/// Atoms remembered under a tag while a program is being built
///
/// Declaring an atom once and reusing it in later rules keeps the same
/// variables in both places. Entries are keyed by predicate and tag, so
/// different schemas never see each other's tags.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    atoms: HashMap<(String, String), Atom>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `atom` under `tag` (an empty tag means the default one) and hand it back
    pub fn remember(&mut self, tag: &str, atom: Atom) -> Atom {
        let key = (atom.predicate().to_string(), normalize(tag).to_string());
        self.atoms.insert(key, atom.clone());
        atom
    }

    pub fn recall(&self, schema: &Schema, tag: &str) -> AspResult<Atom> {
        let tag = normalize(tag);
        self.atoms
            .get(&(schema.predicate().to_string(), tag.to_string()))
            .cloned()
            .ok_or_else(|| {
                AspError::construction(format!(
                    "No '{}' atom remembered as '{}'",
                    schema.predicate(),
                    tag
                ))
            })
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

fn normalize(tag: &str) -> &str {
    if tag.is_empty() {
        DEFAULT_TAG
    } else {
        tag
    }
}
