use crate::aggregate::Aggregate;
use crate::atom::Atom;
use crate::term::Term;
use crate::{AspError, AspResult};
use serde::Serialize;
use std::fmt;
use std::ops::Not;

/// Comparison operators understood by the solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ComparisonOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// How many negation-as-failure markers precede a literal
///
/// Negating a negated literal adds a second marker (`not not a`) instead of
/// restoring the positive literal. Under stable-model semantics `not not a`
/// differs from `a`, so the kinds are kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Affirmed,
    Negated,
    DoublyNegated,
}

impl LiteralKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            LiteralKind::Affirmed => "",
            LiteralKind::Negated => "not ",
            LiteralKind::DoublyNegated => "not not ",
        }
    }

    pub fn negated(self) -> AspResult<Self> {
        match self {
            LiteralKind::Affirmed => Ok(LiteralKind::Negated),
            LiteralKind::Negated => Ok(LiteralKind::DoublyNegated),
            LiteralKind::DoublyNegated => Err(AspError::construction(
                "Cannot negate a doubly negated literal: at most two 'not' markers are allowed",
            )),
        }
    }
}

/// What a literal talks about
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralTarget {
    Atom(Atom),
    Comparison {
        left: Term,
        operator: ComparisonOperator,
        right: Term,
    },
    Aggregate(Aggregate),
}

/// An atom, comparison or aggregate together with its polarity
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    kind: LiteralKind,
    target: LiteralTarget,
}

impl Literal {
    pub fn new(kind: LiteralKind, target: LiteralTarget) -> Self {
        Self { kind, target }
    }

    pub fn comparison(left: Term, operator: ComparisonOperator, right: Term) -> Self {
        Self::new(
            LiteralKind::Affirmed,
            LiteralTarget::Comparison {
                left,
                operator,
                right,
            },
        )
    }

    pub fn kind(&self) -> LiteralKind {
        self.kind
    }

    pub fn target(&self) -> &LiteralTarget {
        &self.target
    }

    pub fn atom(&self) -> Option<&Atom> {
        match &self.target {
            LiteralTarget::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    /// Add one negation marker
    pub fn negated(self) -> AspResult<Self> {
        Ok(Self {
            kind: self.kind.negated()?,
            target: self.target,
        })
    }

    pub fn render(&self) -> AspResult<String> {
        let body = match &self.target {
            LiteralTarget::Atom(atom) => atom.to_string(),
            LiteralTarget::Comparison {
                left,
                operator,
                right,
            } => format!("{} {} {}", left, operator, right),
            LiteralTarget::Aggregate(aggregate) => aggregate.render()?,
        };
        Ok(format!("{}{}", self.kind.prefix(), body))
    }
}

impl From<Atom> for Literal {
    fn from(atom: Atom) -> Self {
        Self::new(LiteralKind::Affirmed, LiteralTarget::Atom(atom))
    }
}

impl From<&Atom> for Literal {
    fn from(atom: &Atom) -> Self {
        Self::from(atom.clone())
    }
}

impl From<Aggregate> for Literal {
    fn from(aggregate: Aggregate) -> Self {
        Self::new(LiteralKind::Affirmed, LiteralTarget::Aggregate(aggregate))
    }
}

impl Not for Atom {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal::new(LiteralKind::Negated, LiteralTarget::Atom(self))
    }
}

impl Not for &Atom {
    type Output = Literal;

    fn not(self) -> Literal {
        !self.clone()
    }
}
