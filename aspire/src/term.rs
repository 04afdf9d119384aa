//! Terms: the values that fill atom fields
//!
//! A term is either bound (an integer, a string, a boolean or an opaque symbol)
//! or unbound (a variable). Arithmetic on terms never evaluates anything; it
//! builds a parenthesized expression that the solver grounds later.

use crate::literal::{ComparisonOperator, Literal};
use crate::{AspError, AspResult};
use std::fmt;
use std::ops::{Add, Div, Mul, Rem, Sub};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VARIABLE: AtomicU64 = AtomicU64::new(0);

/// A variable name as it appears in program text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable(String);

impl Variable {
    /// A variable whose name is unique within this process
    pub fn fresh() -> Self {
        let id = NEXT_VARIABLE.fetch_add(1, Ordering::Relaxed);
        Self(format!("X_{}", id))
    }

    /// A user-named variable, prefixed so it cannot clash with fresh ones
    pub fn named(name: &str) -> AspResult<Self> {
        if name.is_empty() {
            return Err(AspError::construction("Variable name cannot be empty"));
        }
        Ok(Self(format!("VAR_{}", name)))
    }

    pub(crate) fn verbatim(text: String) -> Self {
        Self(text)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A term: a bound value or an unbound placeholder
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Int(i64),
    Str(String),
    Bool(bool),
    /// Constant symbol rendered verbatim, e.g. `red` or `f(1)` read back from the solver
    Symbol(String),
    Unbound(Variable),
}

impl Default for Term {
    fn default() -> Self {
        Term::fresh()
    }
}

impl Term {
    pub fn fresh() -> Self {
        Term::Unbound(Variable::fresh())
    }

    pub fn var(name: &str) -> AspResult<Self> {
        Ok(Term::Unbound(Variable::named(name)?))
    }

    /// The anonymous variable `_`
    pub fn hidden() -> Self {
        Term::Unbound(Variable::verbatim("_".to_string()))
    }

    /// An interval `lo..hi`
    pub fn range(lo: impl Into<Term>, hi: impl Into<Term>) -> Self {
        Term::Unbound(Variable::verbatim(format!("{}..{}", lo.into(), hi.into())))
    }

    /// Absolute value `|t|`
    pub fn abs(term: impl Into<Term>) -> Self {
        Term::Unbound(Variable::verbatim(format!("|{}|", term.into())))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Term::Symbol(name.into())
    }

    pub fn is_bound(&self) -> bool {
        !matches!(self, Term::Unbound(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Term::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Term::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Term::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Build the literal `self OP other`; evaluation is left to the solver
    pub fn compare(&self, operator: ComparisonOperator, other: impl Into<Term>) -> Literal {
        Literal::comparison(self.clone(), operator, other.into())
    }

    pub fn equals(&self, other: impl Into<Term>) -> Literal {
        self.compare(ComparisonOperator::Equal, other)
    }

    pub fn not_equals(&self, other: impl Into<Term>) -> Literal {
        self.compare(ComparisonOperator::NotEqual, other)
    }

    pub fn less_than(&self, other: impl Into<Term>) -> Literal {
        self.compare(ComparisonOperator::LessThan, other)
    }

    pub fn less_or_equal(&self, other: impl Into<Term>) -> Literal {
        self.compare(ComparisonOperator::LessThanOrEqual, other)
    }

    pub fn greater_than(&self, other: impl Into<Term>) -> Literal {
        self.compare(ComparisonOperator::GreaterThan, other)
    }

    pub fn greater_or_equal(&self, other: impl Into<Term>) -> Literal {
        self.compare(ComparisonOperator::GreaterThanOrEqual, other)
    }

    pub fn pow(self, exponent: impl Into<Term>) -> Term {
        Term::arithmetic(self, "**", exponent.into())
    }

    fn arithmetic(left: Term, operator: &str, right: Term) -> Term {
        Term::Unbound(Variable::verbatim(format!(
            "({} {} {})",
            left, operator, right
        )))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Int(n) => write!(f, "{}", n),
            Term::Str(s) => write!(f, "\"{}\"", escape(s)),
            Term::Bool(b) => write!(f, "{}", b),
            Term::Symbol(s) => write!(f, "{}", s),
            Term::Unbound(v) => write!(f, "{}", v),
        }
    }
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Term::Int(n)
    }
}

impl From<i32> for Term {
    fn from(n: i32) -> Self {
        Term::Int(i64::from(n))
    }
}

impl From<u32> for Term {
    fn from(n: u32) -> Self {
        Term::Int(i64::from(n))
    }
}

impl TryFrom<usize> for Term {
    type Error = AspError;

    fn try_from(n: usize) -> AspResult<Self> {
        i64::try_from(n)
            .map(Term::Int)
            .map_err(|_| AspError::construction(format!("{} does not fit in an integer term", n)))
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::Bool(b)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::Str(s.to_string())
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Term::Str(s)
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Unbound(v)
    }
}

impl From<&Term> for Term {
    fn from(t: &Term) -> Self {
        t.clone()
    }
}

macro_rules! impl_term_arithmetic {
    ($($trait:ident, $method:ident, $symbol:expr);+ $(;)?) => {
        $(
            impl $trait<Term> for Term {
                type Output = Term;

                fn $method(self, rhs: Term) -> Term {
                    Term::arithmetic(self, $symbol, rhs)
                }
            }

            impl $trait<&Term> for &Term {
                type Output = Term;

                fn $method(self, rhs: &Term) -> Term {
                    Term::arithmetic(self.clone(), $symbol, rhs.clone())
                }
            }

            impl $trait<i64> for Term {
                type Output = Term;

                fn $method(self, rhs: i64) -> Term {
                    Term::arithmetic(self, $symbol, Term::Int(rhs))
                }
            }

            impl $trait<Term> for i64 {
                type Output = Term;

                fn $method(self, rhs: Term) -> Term {
                    Term::arithmetic(Term::Int(self), $symbol, rhs)
                }
            }
        )+
    };
}

// `\` is the solver's modulo operator
impl_term_arithmetic!(
    Add, add, "+";
    Sub, sub, "-";
    Mul, mul, "*";
    Div, div, "/";
    Rem, rem, "\\";
);
