//! Rules: choice rules (`Guess`), normal and disjunctive rules (`Define`) and
//! hard or weak constraints (`Assert`)
//!
//! Every rule renders as `HEAD :- BODY.`; the separator is dropped when the
//! body is empty and the head is empty for constraints.

use crate::aggregate::{Aggregate, ConditionalLiteral};
use crate::atom::Atom;
use crate::literal::Literal;
use crate::solver::Solver;
use crate::term::Term;
use crate::{AspError, AspResult};

/// A literal or a conditional literal, as allowed in rule heads and bodies
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Literal(Literal),
    Conditional(ConditionalLiteral),
}

impl Clause {
    pub fn render(&self) -> AspResult<String> {
        match self {
            Clause::Literal(literal) => literal.render(),
            Clause::Conditional(conditional) => conditional.render(),
        }
    }
}

impl From<Literal> for Clause {
    fn from(literal: Literal) -> Self {
        Clause::Literal(literal)
    }
}

impl From<Atom> for Clause {
    fn from(atom: Atom) -> Self {
        Clause::Literal(Literal::from(atom))
    }
}

impl From<&Atom> for Clause {
    fn from(atom: &Atom) -> Self {
        Clause::Literal(Literal::from(atom))
    }
}

impl From<Aggregate> for Clause {
    fn from(aggregate: Aggregate) -> Self {
        Clause::Literal(Literal::from(aggregate))
    }
}

impl From<ConditionalLiteral> for Clause {
    fn from(conditional: ConditionalLiteral) -> Self {
        Clause::Conditional(conditional)
    }
}

fn render_joined(clauses: &[Clause], separator: &str) -> AspResult<String> {
    Ok(clauses
        .iter()
        .map(Clause::render)
        .collect::<AspResult<Vec<_>>>()?
        .join(separator))
}

fn render_rule(head: &str, body: &[Clause]) -> AspResult<String> {
    let body = render_joined(body, "; ")?;
    let separator = if body.is_empty() { "" } else { " :- " };
    Ok(format!("{}{}{}.", head, separator, body))
}

macro_rules! impl_body_builder {
    ($($rule:ty),+) => {
        $(
            impl $rule {
                /// Append one condition to the body
                pub fn when(mut self, condition: impl Into<Clause>) -> Self {
                    self.body.push(condition.into());
                    self
                }

                pub fn when_all<I, C>(mut self, conditions: I) -> Self
                where
                    I: IntoIterator<Item = C>,
                    C: Into<Clause>,
                {
                    self.body.extend(conditions.into_iter().map(Into::into));
                    self
                }

                pub fn body(&self) -> &[Clause] {
                    &self.body
                }
            }
        )+
    };
}

/// The set a choice rule picks from
#[derive(Debug, Clone, PartialEq)]
pub enum GuessHead {
    Literal(Literal),
    /// Literals joined with `;`
    Set(Vec<Literal>),
    Conditional(ConditionalLiteral),
}

impl GuessHead {
    pub fn set<I, L>(literals: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        GuessHead::Set(literals.into_iter().map(Into::into).collect())
    }

    fn render(&self) -> AspResult<String> {
        match self {
            GuessHead::Literal(literal) => literal.render(),
            GuessHead::Set(literals) => Ok(literals
                .iter()
                .map(Literal::render)
                .collect::<AspResult<Vec<_>>>()?
                .join(";")),
            GuessHead::Conditional(conditional) => conditional.render(),
        }
    }
}

impl From<Atom> for GuessHead {
    fn from(atom: Atom) -> Self {
        GuessHead::Literal(Literal::from(atom))
    }
}

impl From<Literal> for GuessHead {
    fn from(literal: Literal) -> Self {
        GuessHead::Literal(literal)
    }
}

impl From<ConditionalLiteral> for GuessHead {
    fn from(conditional: ConditionalLiteral) -> Self {
        GuessHead::Conditional(conditional)
    }
}

/// A choice rule: `lo <= {H} <= hi :- body.`
#[derive(Debug, Clone, PartialEq)]
pub struct Guess {
    head: GuessHead,
    exactly: Option<Term>,
    at_least: Option<Term>,
    at_most: Option<Term>,
    body: Vec<Clause>,
}

impl Guess {
    /// `exactly` cannot be combined with `at_least` or `at_most`
    pub fn new(
        head: impl Into<GuessHead>,
        exactly: Option<Term>,
        at_least: Option<Term>,
        at_most: Option<Term>,
    ) -> AspResult<Self> {
        let head = head.into();
        let empty = match &head {
            GuessHead::Set(literals) => literals.is_empty(),
            GuessHead::Conditional(conditional) => conditional.is_empty(),
            GuessHead::Literal(_) => false,
        };
        if empty {
            return Err(AspError::construction("Unexpected empty head set for guess"));
        }
        if exactly.is_some() && (at_least.is_some() || at_most.is_some()) {
            return Err(AspError::construction(
                "Error while building guess: exactly is incompatible with at_least and at_most",
            ));
        }
        Ok(Self {
            head,
            exactly,
            at_least,
            at_most,
            body: Vec::new(),
        })
    }

    /// An unbounded choice `{H}`
    pub fn choice(head: impl Into<GuessHead>) -> AspResult<Self> {
        Self::new(head, None, None, None)
    }

    pub fn exactly(head: impl Into<GuessHead>, count: impl Into<Term>) -> AspResult<Self> {
        Self::new(head, Some(count.into()), None, None)
    }

    pub fn between(
        head: impl Into<GuessHead>,
        at_least: impl Into<Term>,
        at_most: impl Into<Term>,
    ) -> AspResult<Self> {
        Self::new(head, None, Some(at_least.into()), Some(at_most.into()))
    }

    pub fn head_text(&self) -> AspResult<String> {
        let set = format!("{{{}}}", self.head.render()?);
        Ok(match (&self.exactly, &self.at_least, &self.at_most) {
            (Some(n), _, _) => format!("{} = {}", set, n),
            (None, Some(lo), Some(hi)) => format!("{} <= {} <= {}", lo, set, hi),
            (None, Some(lo), None) => format!("{} <= {}", lo, set),
            (None, None, Some(hi)) => format!("{} <= {}", set, hi),
            (None, None, None) => set,
        })
    }

    pub fn render(&self) -> AspResult<String> {
        render_rule(&self.head_text()?, &self.body)
    }
}

/// A fact, normal rule or disjunctive rule: `h1 | h2 :- body.`
#[derive(Debug, Clone, PartialEq)]
pub struct Define {
    heads: Vec<Clause>,
    body: Vec<Clause>,
}

impl Define {
    pub fn new<I, C>(heads: I) -> AspResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        let heads: Vec<Clause> = heads.into_iter().map(Into::into).collect();
        if heads.is_empty() {
            return Err(AspError::construction("Expected at least one head for define"));
        }
        Ok(Self {
            heads,
            body: Vec::new(),
        })
    }

    pub fn fact(atom: Atom) -> Self {
        Self {
            heads: vec![Clause::from(atom)],
            body: Vec::new(),
        }
    }

    pub fn heads(&self) -> &[Clause] {
        &self.heads
    }

    pub fn head_text(&self) -> AspResult<String> {
        render_joined(&self.heads, " | ")
    }

    pub fn render(&self) -> AspResult<String> {
        render_rule(&self.head_text()?, &self.body)
    }
}

/// Weight, priority level and distinguishing terms of a weak constraint
///
/// String terms are written unquoted, so `"x"` and `Term::symbol("x")` both
/// render as `x` in the tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct Penalty {
    pub weight: Term,
    pub level: Term,
    pub terms: Vec<Term>,
}

/// A constraint requiring at least one of its disjuncts to hold
///
/// The disjuncts are negated into the body: `Assert(a, b)` renders
/// ` :- not a; not b.` With [`Assert::otherwise`] it becomes a weak
/// constraint that costs `weight@level` instead of discarding the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Assert {
    body: Vec<Clause>,
    penalty: Option<Penalty>,
}

impl Assert {
    pub fn new<I, L>(disjuncts: I) -> AspResult<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        let body = disjuncts
            .into_iter()
            .map(|disjunct| disjunct.into().negated().map(Clause::Literal))
            .collect::<AspResult<Vec<_>>>()?;
        Ok(Self {
            body,
            penalty: None,
        })
    }

    /// A constraint with no disjuncts; its body comes entirely from `when`
    pub fn unconditional() -> Self {
        Self {
            body: Vec::new(),
            penalty: None,
        }
    }

    pub fn otherwise<I, T>(mut self, weight: impl Into<Term>, level: impl Into<Term>, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.penalty = Some(Penalty {
            weight: weight.into(),
            level: level.into(),
            terms: terms.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn penalty(&self) -> Option<&Penalty> {
        self.penalty.as_ref()
    }

    pub fn is_soft(&self) -> bool {
        self.penalty.is_some()
    }

    pub fn render(&self) -> AspResult<String> {
        let body = render_joined(&self.body, "; ")?;
        if body.is_empty() {
            return Err(AspError::render(
                "Constraint has an empty body: add disjuncts or a when condition",
            ));
        }
        match &self.penalty {
            Some(penalty) => {
                let mut annotation = format!("{}@{}", penalty.weight, penalty.level);
                for term in &penalty.terms {
                    annotation.push(',');
                    match term {
                        Term::Str(text) => annotation.push_str(text),
                        other => annotation.push_str(&other.to_string()),
                    }
                }
                Ok(format!(" :~ {}. [{}]", body, annotation))
            }
            None => render_rule("", &self.body),
        }
    }
}

impl_body_builder!(Guess, Define, Assert);

/// Any statement of a program
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Guess(Guess),
    Define(Define),
    Assert(Assert),
    /// Program text added verbatim
    Raw(String),
}

impl Definition {
    pub fn render(&self) -> AspResult<String> {
        match self {
            Definition::Guess(guess) => guess.render(),
            Definition::Define(define) => define.render(),
            Definition::Assert(assert) => assert.render(),
            Definition::Raw(text) => Ok(text.trim().to_string()),
        }
    }

    /// Ask the solver whether this statement parses and grounds on its own
    pub fn check(&self, solver: &Solver) -> AspResult<Option<String>> {
        solver.check_text(&self.render()?)
    }
}

impl From<Guess> for Definition {
    fn from(guess: Guess) -> Self {
        Definition::Guess(guess)
    }
}

impl From<Define> for Definition {
    fn from(define: Define) -> Self {
        Definition::Define(define)
    }
}

impl From<Assert> for Definition {
    fn from(assert: Assert) -> Self {
        Definition::Assert(assert)
    }
}

impl From<Atom> for Definition {
    fn from(atom: Atom) -> Self {
        Definition::Define(Define::fact(atom))
    }
}

impl From<&Atom> for Definition {
    fn from(atom: &Atom) -> Self {
        Definition::Define(Define::fact(atom.clone()))
    }
}

impl From<&str> for Definition {
    fn from(text: &str) -> Self {
        Definition::Raw(text.to_string())
    }
}

impl From<String> for Definition {
    fn from(text: String) -> Self {
        Definition::Raw(text)
    }
}

/// Accumulates a rule body, then closes it with a head
///
/// ```rust
/// use aspire::{FieldKind, Schema, When};
///
/// let node = Schema::builder("node").field("id", FieldKind::Int).build()?;
/// let reached = Schema::builder("reached").field("id", FieldKind::Int).build()?;
/// let n = node.any();
/// let id = n.term("id")?.clone();
/// let rule = When::new(n).define([reached.atom().with("id", id).build()?])?;
/// assert!(rule.render()?.starts_with("reached(X_"));
/// # Ok::<(), aspire::AspError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct When {
    body: Vec<Clause>,
}

impl When {
    pub fn new(condition: impl Into<Clause>) -> Self {
        Self {
            body: vec![condition.into()],
        }
    }

    pub fn all<I, C>(conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        Self {
            body: conditions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn and_also(mut self, condition: impl Into<Clause>) -> Self {
        self.body.push(condition.into());
        self
    }

    /// At least one disjunct must hold whenever the condition does
    pub fn holds<I, L>(&self, disjuncts: I) -> AspResult<Assert>
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        Ok(Assert::new(disjuncts)?.when_all(self.body.clone()))
    }

    /// The condition must never hold
    pub fn never(&self) -> Assert {
        Assert::unconditional().when_all(self.body.clone())
    }

    pub fn define<I, C>(&self, heads: I) -> AspResult<Define>
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        Ok(Define::new(heads)?.when_all(self.body.clone()))
    }

    pub fn guess(
        &self,
        head: impl Into<GuessHead>,
        exactly: Option<Term>,
        at_least: Option<Term>,
        at_most: Option<Term>,
    ) -> AspResult<Guess> {
        Ok(Guess::new(head, exactly, at_least, at_most)?.when_all(self.body.clone()))
    }
}
