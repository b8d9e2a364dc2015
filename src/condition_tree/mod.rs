//! The condition AST behind a WHERE clause, and its compiler to query text.
//!
//! A `ConditionNode` normally comes from the predicate translator (or from
//! `WhereClause::intersect` combining translated roots), which guarantees
//! NOT nodes have exactly one child and AND/OR nodes at least two. The
//! fields are public, so hand-built trees can violate those arities;
//! rendering is total either way and degenerates to empty text instead of
//! panicking.

pub mod literal;
pub mod terms;
pub mod translate;

use serde::{Deserialize, Serialize};

use crate::model_catalog::PropertyKind;
use literal::{escape_quotes, QueryLiteral};

/// Anything that renders itself as a fragment of the final query string.
pub trait ToQueryText {
    fn to_query_text(&self) -> String;
}

/// A validated reference to a property of the entity bound to an alias.
/// `property` is the JSON wire name; `kind` is `None` for aliases bound
/// without a schema (relationship hops, untyped twin collections).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRef {
    pub alias: String,
    pub property: String,
    pub kind: Option<PropertyKind>,
}

impl PropertyRef {
    fn render(&self) -> String {
        format!("{}.{}", self.alias, self.property)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ComparisonOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::LessThan => "<",
            ComparisonOp::LessThanOrEqual => "<=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::GreaterThanOrEqual => ">=",
        }
    }

    /// Ordering comparisons are only meaningful on numeric properties.
    pub fn is_ordering(self) -> bool {
        !matches!(self, ComparisonOp::Equal | ComparisonOp::NotEqual)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryScalarOp {
    IsBool,
    IsDefined,
    IsNull,
    IsNumber,
    IsObject,
    IsString,
    IsPrimitive,
}

impl UnaryScalarOp {
    pub fn opname(self) -> &'static str {
        match self {
            UnaryScalarOp::IsBool => "IS_BOOL",
            UnaryScalarOp::IsDefined => "IS_DEFINED",
            UnaryScalarOp::IsNull => "IS_NULL",
            UnaryScalarOp::IsNumber => "IS_NUMBER",
            UnaryScalarOp::IsObject => "IS_OBJECT",
            UnaryScalarOp::IsString => "IS_STRING",
            UnaryScalarOp::IsPrimitive => "IS_PRIMITIVE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryStringOp {
    EndsWith,
    StartsWith,
    Contains,
}

impl BinaryStringOp {
    pub fn opname(self) -> &'static str {
        match self {
            BinaryStringOp::EndsWith => "ENDSWITH",
            BinaryStringOp::StartsWith => "STARTSWITH",
            BinaryStringOp::Contains => "CONTAINS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

impl LogicalOp {
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => terms::AND,
            LogicalOp::Or => terms::OR,
            LogicalOp::Not => terms::NOT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionNode {
    Comparison {
        property: PropertyRef,
        op: ComparisonOp,
        value: QueryLiteral,
    },
    ScalarUnary {
        property: PropertyRef,
        op: UnaryScalarOp,
    },
    ScalarBinary {
        property: PropertyRef,
        op: BinaryStringOp,
        value: QueryLiteral,
    },
    SetMembership {
        property: PropertyRef,
        values: Vec<QueryLiteral>,
        negated: bool,
    },
    IsOfModel {
        alias: String,
        model_tag: String,
    },
    Logical {
        op: LogicalOp,
        children: Vec<ConditionNode>,
    },
}

impl ConditionNode {
    /// AND two roots together, flattening into an existing top-level AND so
    /// repeated intersection keeps a single conjunction list.
    pub fn intersect(self, other: ConditionNode) -> ConditionNode {
        match self {
            ConditionNode::Logical {
                op: LogicalOp::And,
                mut children,
            } => {
                children.push(other);
                ConditionNode::Logical {
                    op: LogicalOp::And,
                    children,
                }
            }
            existing => ConditionNode::Logical {
                op: LogicalOp::And,
                children: vec![existing, other],
            },
        }
    }

    /// Whether this child needs parentheses inside a parent AND/OR chain.
    /// Only a nested AND/OR of the *other* operator is ambiguous; NOT and
    /// the scalar operators render self-delimiting text.
    fn needs_parens_inside(&self, parent: LogicalOp) -> bool {
        match self {
            ConditionNode::Logical {
                op: op @ (LogicalOp::And | LogicalOp::Or),
                ..
            } => *op != parent,
            _ => false,
        }
    }
}

impl ToQueryText for ConditionNode {
    fn to_query_text(&self) -> String {
        match self {
            ConditionNode::Comparison {
                property,
                op,
                value,
            } => format!("{} {} {}", property.render(), op.symbol(), value.render()),
            ConditionNode::ScalarUnary { property, op } => {
                format!("{}({})", op.opname(), property.render())
            }
            ConditionNode::ScalarBinary {
                property,
                op,
                value,
            } => format!(
                "{}({}, {})",
                op.opname(),
                property.render(),
                value.render()
            ),
            ConditionNode::SetMembership {
                property,
                values,
                negated,
            } => format!(
                "{} {} [{}]",
                property.render(),
                if *negated { terms::NIN } else { terms::IN },
                QueryLiteral::render_list(values)
            ),
            ConditionNode::IsOfModel { alias, model_tag } => format!(
                "{}({}, '{}')",
                terms::IS_OF_MODEL,
                alias,
                escape_quotes(model_tag)
            ),
            ConditionNode::Logical { op: LogicalOp::Not, children } => match children.first() {
                Some(child) => format!("{}({})", terms::NOT, child.to_query_text()),
                None => String::new(),
            },
            ConditionNode::Logical { op, children } => {
                let separator = format!(" {} ", op.keyword());
                children
                    .iter()
                    .map(|child| {
                        let text = child.to_query_text();
                        if child.needs_parens_inside(*op) {
                            format!("({text})")
                        } else {
                            text
                        }
                    })
                    .collect::<Vec<String>>()
                    .join(&separator)
            }
        }
    }
}
