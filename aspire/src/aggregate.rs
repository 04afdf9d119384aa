//! Set-builder clauses and aggregates
//!
//! A [`ConditionalLiteral`] renders as `elem : cond; elem2 : cond2`. An
//! [`Aggregate`] wraps one (or a plain literal set, for `#count`) in
//! `#kind{...}` and compares the result against a bound.

use crate::atom::Atom;
use crate::literal::{ComparisonOperator, Literal};
use crate::term::Term;
use crate::{AspError, AspResult};
use std::fmt;

/// One position of an element tuple
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Term(Term),
    Literal(Literal),
}

impl Element {
    fn render(&self) -> AspResult<String> {
        match self {
            Element::Term(term) => Ok(term.to_string()),
            Element::Literal(literal) => literal.render(),
        }
    }
}

impl From<Term> for Element {
    fn from(term: Term) -> Self {
        Element::Term(term)
    }
}

impl From<&Term> for Element {
    fn from(term: &Term) -> Self {
        Element::Term(term.clone())
    }
}

impl From<i64> for Element {
    fn from(n: i64) -> Self {
        Element::Term(Term::Int(n))
    }
}

impl From<Literal> for Element {
    fn from(literal: Literal) -> Self {
        Element::Literal(literal)
    }
}

impl From<Atom> for Element {
    fn from(atom: Atom) -> Self {
        Element::Literal(Literal::from(atom))
    }
}

impl From<&Atom> for Element {
    fn from(atom: &Atom) -> Self {
        Element::Literal(Literal::from(atom))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalEntry {
    pub elements: Vec<Element>,
    pub condition: Vec<Literal>,
}

impl ConditionalEntry {
    fn render(&self) -> AspResult<String> {
        let elements = self
            .elements
            .iter()
            .map(Element::render)
            .collect::<AspResult<Vec<_>>>()?
            .join(",");
        if self.condition.is_empty() {
            return Ok(elements);
        }
        let condition = self
            .condition
            .iter()
            .map(Literal::render)
            .collect::<AspResult<Vec<_>>>()?
            .join(", ");
        Ok(format!("{} : {}", elements, condition))
    }
}

/// Ordered `(element, condition)` pairs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionalLiteral {
    entries: Vec<ConditionalEntry>,
}

impl ConditionalLiteral {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `element : condition`
    pub fn entry<E, C, L>(self, element: E, condition: C) -> Self
    where
        E: Into<Element>,
        C: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        self.tuple_entry([element.into()], condition)
    }

    /// Add an element that holds without a condition
    pub fn element(self, element: impl Into<Element>) -> Self {
        self.tuple_entry([element.into()], Vec::<Literal>::new())
    }

    /// Add `e1,e2,... : condition`, as aggregates need for weighted elements
    pub fn tuple_entry<I, E, C, L>(mut self, elements: I, condition: C) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
        C: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        self.entries.push(ConditionalEntry {
            elements: elements.into_iter().map(Into::into).collect(),
            condition: condition.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn entries(&self) -> &[ConditionalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> AspResult<String> {
        if self.entries.is_empty() {
            return Err(AspError::render("Conditional literal has no elements"));
        }
        Ok(self
            .entries
            .iter()
            .map(ConditionalEntry::render)
            .collect::<AspResult<Vec<_>>>()?
            .join("; "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Count,
    Sum,
    Min,
    Max,
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregateKind::Count => "count",
            AggregateKind::Sum => "sum",
            AggregateKind::Min => "min",
            AggregateKind::Max => "max",
        };
        write!(f, "{}", name)
    }
}

/// The set an aggregate ranges over
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateSource {
    /// Plain literals, accepted by `#count` only
    Literals(Vec<Literal>),
    Conditional(ConditionalLiteral),
}

/// `#kind{set} OP bound`
///
/// The comparison methods return a new aggregate carrying the bound and leave
/// the receiver untouched. Comparing the result again replaces its bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    kind: AggregateKind,
    source: AggregateSource,
    bound: Option<(ComparisonOperator, Term)>,
}

impl Aggregate {
    pub fn new(kind: AggregateKind, source: AggregateSource) -> AspResult<Self> {
        if kind != AggregateKind::Count && matches!(source, AggregateSource::Literals(_)) {
            return Err(AspError::construction(format!(
                "#{} needs weighted elements: use a conditional literal, not a literal set",
                kind
            )));
        }
        Ok(Self {
            kind,
            source,
            bound: None,
        })
    }

    pub fn count(elements: ConditionalLiteral) -> Self {
        Self::unbounded(AggregateKind::Count, AggregateSource::Conditional(elements))
    }

    /// `#count` over plain literals
    pub fn count_of<I, L>(literals: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        Self::unbounded(
            AggregateKind::Count,
            AggregateSource::Literals(literals.into_iter().map(Into::into).collect()),
        )
    }

    pub fn sum(elements: ConditionalLiteral) -> Self {
        Self::unbounded(AggregateKind::Sum, AggregateSource::Conditional(elements))
    }

    pub fn min(elements: ConditionalLiteral) -> Self {
        Self::unbounded(AggregateKind::Min, AggregateSource::Conditional(elements))
    }

    pub fn max(elements: ConditionalLiteral) -> Self {
        Self::unbounded(AggregateKind::Max, AggregateSource::Conditional(elements))
    }

    fn unbounded(kind: AggregateKind, source: AggregateSource) -> Self {
        Self {
            kind,
            source,
            bound: None,
        }
    }

    pub fn kind(&self) -> AggregateKind {
        self.kind
    }

    pub fn source(&self) -> &AggregateSource {
        &self.source
    }

    pub fn bound(&self) -> Option<&(ComparisonOperator, Term)> {
        self.bound.as_ref()
    }

    pub fn compare(&self, operator: ComparisonOperator, bound: impl Into<Term>) -> Aggregate {
        Aggregate {
            kind: self.kind,
            source: self.source.clone(),
            bound: Some((operator, bound.into())),
        }
    }

    pub fn equals(&self, bound: impl Into<Term>) -> Aggregate {
        self.compare(ComparisonOperator::Equal, bound)
    }

    pub fn not_equals(&self, bound: impl Into<Term>) -> Aggregate {
        self.compare(ComparisonOperator::NotEqual, bound)
    }

    pub fn less_than(&self, bound: impl Into<Term>) -> Aggregate {
        self.compare(ComparisonOperator::LessThan, bound)
    }

    pub fn less_or_equal(&self, bound: impl Into<Term>) -> Aggregate {
        self.compare(ComparisonOperator::LessThanOrEqual, bound)
    }

    pub fn greater_than(&self, bound: impl Into<Term>) -> Aggregate {
        self.compare(ComparisonOperator::GreaterThan, bound)
    }

    pub fn greater_or_equal(&self, bound: impl Into<Term>) -> Aggregate {
        self.compare(ComparisonOperator::GreaterThanOrEqual, bound)
    }

    pub fn render(&self) -> AspResult<String> {
        let Some((operator, bound)) = &self.bound else {
            return Err(AspError::render(format!(
                "#{} aggregate is missing its operator and bound",
                self.kind
            )));
        };
        let set = match &self.source {
            AggregateSource::Conditional(elements) => elements.render()?,
            AggregateSource::Literals(literals) => {
                if literals.is_empty() {
                    return Err(AspError::render(format!(
                        "#{} aggregate has an empty literal set",
                        self.kind
                    )));
                }
                literals
                    .iter()
                    .map(Literal::render)
                    .collect::<AspResult<Vec<_>>>()?
                    .join("; ")
            }
        };
        Ok(format!("#{}{{{}}} {} {}", self.kind, set, operator, bound))
    }
}
