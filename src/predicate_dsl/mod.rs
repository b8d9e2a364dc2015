//! The fluent predicate DSL.
//!
//! Callers describe a boolean predicate over twin/relationship properties
//! by composing `PredicateExpr` values instead of writing query text. The
//! grammar here is deliberately wider than the target language: it can
//! spell operators and call shapes the language cannot express, so that the
//! translator can identify each offending construct and reject it with a
//! precise error rather than failing on an opaque "cannot build".
//!
//! Translation is purely structural. A predicate is never evaluated against
//! data, and structurally identical predicates always translate to the same
//! condition tree.

mod combinators;

pub use combinators::{decimal, not, of_model, property, value};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PredicateExpr {
    /// `alias.PropertyName` access, using the declared (model) name.
    Property { alias: String, name: String },
    /// A caller-supplied value. Arrays are only meaningful as the right
    /// operand of IN/NIN; objects are rejected during translation.
    Literal(Value),
    /// An explicit decimal literal, carried textually since JSON has no
    /// decimal kind.
    Decimal(String),
    /// Operator applied to operands, e.g. comparison or logical composition.
    Operator(OperatorApplication),
    /// Method-style call, e.g. `is_defined` or `starts_with`. Only the
    /// whitelisted scalar tests survive translation.
    FnCall {
        name: String,
        args: Vec<PredicateExpr>,
    },
    /// Model-type test on an alias: `IS_OF_MODEL(alias, 'tag')`.
    OfModel { alias: String, model_tag: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorApplication {
    pub operator: PredicateOp,
    pub operands: Vec<PredicateExpr>,
}

/// Every operator the DSL can spell. The lower block has no equivalent in
/// the target language and exists so the translator can name the operator
/// it rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredicateOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    Not,
    In,
    NotIn,

    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    RegexMatch,
}

impl PredicateOp {
    /// Spelling used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            PredicateOp::Equal => "==",
            PredicateOp::NotEqual => "!=",
            PredicateOp::LessThan => "<",
            PredicateOp::LessThanOrEqual => "<=",
            PredicateOp::GreaterThan => ">",
            PredicateOp::GreaterThanOrEqual => ">=",
            PredicateOp::And => "AND",
            PredicateOp::Or => "OR",
            PredicateOp::Not => "NOT",
            PredicateOp::In => "IN",
            PredicateOp::NotIn => "NIN",
            PredicateOp::Addition => "+",
            PredicateOp::Subtraction => "-",
            PredicateOp::Multiplication => "*",
            PredicateOp::Division => "/",
            PredicateOp::Modulo => "%",
            PredicateOp::RegexMatch => "=~",
        }
    }
}

impl PredicateExpr {
    /// Apply an arbitrary operator. The fluent combinators cover the
    /// supported grammar; this escape hatch exists for generic callers and
    /// spells the shapes translation will reject.
    pub fn apply(operator: PredicateOp, operands: Vec<PredicateExpr>) -> PredicateExpr {
        PredicateExpr::Operator(OperatorApplication { operator, operands })
    }

    /// Arbitrary method-style call. Anything outside the whitelisted
    /// scalar tests fails translation with `UnsupportedExpression`.
    pub fn call(name: impl Into<String>, args: Vec<PredicateExpr>) -> PredicateExpr {
        PredicateExpr::FnCall {
            name: name.into(),
            args,
        }
    }
}
