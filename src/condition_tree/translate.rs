//! Predicate translation: DSL expression -> condition tree.
//!
//! The walk is purely structural. Each recognized shape maps directly to a
//! `ConditionNode`; everything else is rejected with an error naming the
//! offending operator, property or expression fragment. No partial tree
//! ever escapes a failed translation.

use log::debug;
use serde_json::Value;

use crate::alias_registry::AliasRegistry;
use crate::errors::QueryBuildError;
use crate::predicate_dsl::{OperatorApplication, PredicateExpr, PredicateOp};

use super::literal::QueryLiteral;
use super::terms::{self, ScalarTest};
use super::{ComparisonOp, ConditionNode, LogicalOp, PropertyRef};

pub struct PredicateTranslator<'a> {
    registry: &'a AliasRegistry,
}

impl<'a> PredicateTranslator<'a> {
    pub fn new(registry: &'a AliasRegistry) -> Self {
        PredicateTranslator { registry }
    }

    /// Translate a caller-built predicate into a condition tree.
    pub fn translate(&self, expr: &PredicateExpr) -> Result<ConditionNode, QueryBuildError> {
        let node = self.translate_boolean(expr)?;
        debug!("translated predicate into condition tree: {node:?}");
        Ok(node)
    }

    /// Translate an expression expected to be a boolean predicate.
    fn translate_boolean(&self, expr: &PredicateExpr) -> Result<ConditionNode, QueryBuildError> {
        match expr {
            PredicateExpr::Operator(app) => self.translate_operator(app),
            PredicateExpr::FnCall { name, args } => self.translate_fn_call(name, args),
            PredicateExpr::OfModel { alias, model_tag } => {
                self.registry.resolve(alias)?;
                Ok(ConditionNode::IsOfModel {
                    alias: alias.clone(),
                    model_tag: model_tag.clone(),
                })
            }
            PredicateExpr::Property { alias, name } => {
                Err(QueryBuildError::UnsupportedExpression(format!(
                    "bare property reference '{alias}.{name}' is not a boolean predicate"
                )))
            }
            PredicateExpr::Literal(_) | PredicateExpr::Decimal(_) => {
                Err(QueryBuildError::UnsupportedExpression(
                    "a literal is not a boolean predicate".to_string(),
                ))
            }
        }
    }

    fn translate_operator(
        &self,
        app: &OperatorApplication,
    ) -> Result<ConditionNode, QueryBuildError> {
        match app.operator {
            PredicateOp::And | PredicateOp::Or => self.translate_logical(app),
            PredicateOp::Not => {
                if app.operands.len() != 1 {
                    return Err(QueryBuildError::UnsupportedExpression(format!(
                        "NOT takes exactly one operand, found {}",
                        app.operands.len()
                    )));
                }
                let child = self.translate_boolean(&app.operands[0])?;
                Ok(ConditionNode::Logical {
                    op: LogicalOp::Not,
                    children: vec![child],
                })
            }
            PredicateOp::Equal
            | PredicateOp::NotEqual
            | PredicateOp::LessThan
            | PredicateOp::LessThanOrEqual
            | PredicateOp::GreaterThan
            | PredicateOp::GreaterThanOrEqual => self.translate_comparison(app),
            PredicateOp::In | PredicateOp::NotIn => self.translate_membership(app),
            PredicateOp::Addition
            | PredicateOp::Subtraction
            | PredicateOp::Multiplication
            | PredicateOp::Division
            | PredicateOp::Modulo
            | PredicateOp::RegexMatch => Err(QueryBuildError::UnsupportedOperator(
                app.operator.name().to_string(),
            )),
        }
    }

    fn translate_logical(
        &self,
        app: &OperatorApplication,
    ) -> Result<ConditionNode, QueryBuildError> {
        if app.operands.len() < 2 {
            return Err(QueryBuildError::UnsupportedExpression(format!(
                "{} requires at least two operands, found {}",
                app.operator.name(),
                app.operands.len()
            )));
        }
        let op = match app.operator {
            PredicateOp::And => LogicalOp::And,
            _ => LogicalOp::Or,
        };
        let children = app
            .operands
            .iter()
            .map(|operand| self.translate_boolean(operand))
            .collect::<Result<Vec<ConditionNode>, QueryBuildError>>()?;
        Ok(ConditionNode::Logical { op, children })
    }

    fn translate_comparison(
        &self,
        app: &OperatorApplication,
    ) -> Result<ConditionNode, QueryBuildError> {
        let (lhs, rhs) = binary_operands(app)?;
        let property = self.resolve_property(lhs)?;
        let value = self.scalar_operand(rhs)?;

        let op = match app.operator {
            PredicateOp::Equal => ComparisonOp::Equal,
            PredicateOp::NotEqual => ComparisonOp::NotEqual,
            PredicateOp::LessThan => ComparisonOp::LessThan,
            PredicateOp::LessThanOrEqual => ComparisonOp::LessThanOrEqual,
            PredicateOp::GreaterThan => ComparisonOp::GreaterThan,
            _ => ComparisonOp::GreaterThanOrEqual,
        };

        // Ordering only makes sense on numeric properties; equality is
        // kind-agnostic.
        if op.is_ordering() {
            if let Some(kind) = property.kind {
                if !kind.is_numeric() {
                    return Err(QueryBuildError::UnsupportedOperator(format!(
                        "{} on non-numeric property '{}.{}'",
                        op.symbol(),
                        property.alias,
                        property.property
                    )));
                }
            }
        }

        Ok(ConditionNode::Comparison {
            property,
            op,
            value,
        })
    }

    fn translate_membership(
        &self,
        app: &OperatorApplication,
    ) -> Result<ConditionNode, QueryBuildError> {
        let (lhs, rhs) = binary_operands(app)?;
        let property = self.resolve_property(lhs)?;
        let values = match rhs {
            PredicateExpr::Literal(Value::Array(elements)) => elements
                .iter()
                .map(QueryLiteral::from_scalar)
                .collect::<Result<Vec<QueryLiteral>, QueryBuildError>>()?,
            _ => {
                return Err(QueryBuildError::UnsupportedExpression(
                    "membership test requires an array of scalar values".to_string(),
                ))
            }
        };
        Ok(ConditionNode::SetMembership {
            property,
            values,
            negated: app.operator == PredicateOp::NotIn,
        })
    }

    fn translate_fn_call(
        &self,
        name: &str,
        args: &[PredicateExpr],
    ) -> Result<ConditionNode, QueryBuildError> {
        let Some(test) = terms::scalar_test(name) else {
            return Err(QueryBuildError::UnsupportedExpression(format!(
                "method call '{name}' is not a recognized scalar test"
            )));
        };
        match test {
            ScalarTest::Unary(op) => {
                let [target] = args else {
                    return Err(QueryBuildError::UnsupportedExpression(format!(
                        "{name} takes exactly one property operand"
                    )));
                };
                let property = self.resolve_property(target)?;
                Ok(ConditionNode::ScalarUnary { property, op })
            }
            ScalarTest::Binary(op) => {
                let [target, argument] = args else {
                    return Err(QueryBuildError::UnsupportedExpression(format!(
                        "{name} takes a property and one string argument"
                    )));
                };
                let property = self.resolve_property(target)?;
                if let Some(kind) = property.kind {
                    if !kind.is_string() {
                        return Err(QueryBuildError::UnsupportedOperator(format!(
                            "{} on non-string property '{}.{}'",
                            op.opname(),
                            property.alias,
                            property.property
                        )));
                    }
                }
                let value = self.scalar_operand(argument)?;
                if !matches!(value, QueryLiteral::String(_)) {
                    return Err(QueryBuildError::UnsupportedExpression(format!(
                        "{} requires a string literal argument",
                        op.opname()
                    )));
                }
                Ok(ConditionNode::ScalarBinary {
                    property,
                    op,
                    value,
                })
            }
        }
    }

    /// Resolve a DSL property access into a validated `PropertyRef`. The
    /// alias must be bound; when its binding carries a model schema the
    /// property must be declared on it and is mapped to its wire name.
    fn resolve_property(&self, expr: &PredicateExpr) -> Result<PropertyRef, QueryBuildError> {
        let PredicateExpr::Property { alias, name } = expr else {
            return Err(QueryBuildError::UnsupportedExpression(format!(
                "expected a property reference, found {expr:?}"
            )));
        };
        let binding = self.registry.resolve(alias)?;
        match &binding.model {
            Some(model) => {
                let def = model.property(name).ok_or_else(|| {
                    QueryBuildError::NoSerializableProperty(format!("{alias}.{name}"))
                })?;
                Ok(PropertyRef {
                    alias: alias.clone(),
                    property: def.wire_name.clone(),
                    kind: Some(def.kind),
                })
            }
            // Schema-less binding (relationship hop or untyped collection):
            // the name passes through and operator gating is skipped.
            None => Ok(PropertyRef {
                alias: alias.clone(),
                property: name.clone(),
                kind: None,
            }),
        }
    }

    /// A scalar literal operand: a JSON scalar or an explicit decimal.
    fn scalar_operand(&self, expr: &PredicateExpr) -> Result<QueryLiteral, QueryBuildError> {
        match expr {
            PredicateExpr::Literal(value) => QueryLiteral::from_scalar(value),
            PredicateExpr::Decimal(repr) => Ok(QueryLiteral::Decimal(repr.clone())),
            PredicateExpr::Property { alias, name } => {
                Err(QueryBuildError::UnsupportedExpression(format!(
                    "property-to-property comparison with '{alias}.{name}' is not supported"
                )))
            }
            other => Err(QueryBuildError::UnsupportedExpression(format!(
                "expected a literal operand, found {other:?}"
            ))),
        }
    }
}

fn binary_operands(
    app: &OperatorApplication,
) -> Result<(&PredicateExpr, &PredicateExpr), QueryBuildError> {
    match app.operands.as_slice() {
        [lhs, rhs] => Ok((lhs, rhs)),
        operands => Err(QueryBuildError::UnsupportedExpression(format!(
            "{} takes exactly two operands, found {}",
            app.operator.name(),
            operands.len()
        ))),
    }
}
