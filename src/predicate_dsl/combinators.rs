//! Fluent builders over `PredicateExpr`.

use serde_json::Value;

use super::{OperatorApplication, PredicateExpr, PredicateOp};

/// Start a predicate from a property of the entity bound to `alias`.
pub fn property(alias: impl Into<String>, name: impl Into<String>) -> PredicateExpr {
    PredicateExpr::Property {
        alias: alias.into(),
        name: name.into(),
    }
}

/// Lift a caller value into the DSL.
pub fn value(v: impl Into<Value>) -> PredicateExpr {
    PredicateExpr::Literal(v.into())
}

/// An explicit decimal literal, e.g. `decimal("10.50")`.
pub fn decimal(repr: impl Into<String>) -> PredicateExpr {
    PredicateExpr::Decimal(repr.into())
}

/// Model-type test: `IS_OF_MODEL(alias, 'tag')`.
pub fn of_model(alias: impl Into<String>, model_tag: impl Into<String>) -> PredicateExpr {
    PredicateExpr::OfModel {
        alias: alias.into(),
        model_tag: model_tag.into(),
    }
}

/// Logical negation.
pub fn not(expr: PredicateExpr) -> PredicateExpr {
    PredicateExpr::apply(PredicateOp::Not, vec![expr])
}

impl PredicateExpr {
    fn compare(self, operator: PredicateOp, rhs: PredicateExpr) -> PredicateExpr {
        PredicateExpr::Operator(OperatorApplication {
            operator,
            operands: vec![self, rhs],
        })
    }

    pub fn eq(self, v: impl Into<Value>) -> PredicateExpr {
        self.compare(PredicateOp::Equal, value(v))
    }

    pub fn ne(self, v: impl Into<Value>) -> PredicateExpr {
        self.compare(PredicateOp::NotEqual, value(v))
    }

    pub fn lt(self, v: impl Into<Value>) -> PredicateExpr {
        self.compare(PredicateOp::LessThan, value(v))
    }

    pub fn le(self, v: impl Into<Value>) -> PredicateExpr {
        self.compare(PredicateOp::LessThanOrEqual, value(v))
    }

    pub fn gt(self, v: impl Into<Value>) -> PredicateExpr {
        self.compare(PredicateOp::GreaterThan, value(v))
    }

    pub fn ge(self, v: impl Into<Value>) -> PredicateExpr {
        self.compare(PredicateOp::GreaterThanOrEqual, value(v))
    }

    /// Compare against an explicit DSL expression (e.g. a decimal literal).
    pub fn eq_expr(self, rhs: PredicateExpr) -> PredicateExpr {
        self.compare(PredicateOp::Equal, rhs)
    }

    pub fn gt_expr(self, rhs: PredicateExpr) -> PredicateExpr {
        self.compare(PredicateOp::GreaterThan, rhs)
    }

    pub fn and(self, other: PredicateExpr) -> PredicateExpr {
        PredicateExpr::apply(PredicateOp::And, vec![self, other])
    }

    pub fn or(self, other: PredicateExpr) -> PredicateExpr {
        PredicateExpr::apply(PredicateOp::Or, vec![self, other])
    }

    pub fn negate(self) -> PredicateExpr {
        not(self)
    }

    /// Set membership: `property IN [values]`.
    pub fn is_in(self, values: Vec<Value>) -> PredicateExpr {
        self.compare(PredicateOp::In, PredicateExpr::Literal(Value::Array(values)))
    }

    /// Negated set membership: `property NIN [values]`.
    pub fn not_in(self, values: Vec<Value>) -> PredicateExpr {
        self.compare(
            PredicateOp::NotIn,
            PredicateExpr::Literal(Value::Array(values)),
        )
    }

    pub fn is_bool(self) -> PredicateExpr {
        PredicateExpr::call("is_bool", vec![self])
    }

    pub fn is_defined(self) -> PredicateExpr {
        PredicateExpr::call("is_defined", vec![self])
    }

    pub fn is_null(self) -> PredicateExpr {
        PredicateExpr::call("is_null", vec![self])
    }

    pub fn is_number(self) -> PredicateExpr {
        PredicateExpr::call("is_number", vec![self])
    }

    pub fn is_object(self) -> PredicateExpr {
        PredicateExpr::call("is_object", vec![self])
    }

    pub fn is_string(self) -> PredicateExpr {
        PredicateExpr::call("is_string", vec![self])
    }

    pub fn is_primitive(self) -> PredicateExpr {
        PredicateExpr::call("is_primitive", vec![self])
    }

    pub fn starts_with(self, prefix: impl Into<String>) -> PredicateExpr {
        let prefix: String = prefix.into();
        PredicateExpr::call("starts_with", vec![self, value(prefix)])
    }

    pub fn ends_with(self, suffix: impl Into<String>) -> PredicateExpr {
        let suffix: String = suffix.into();
        PredicateExpr::call("ends_with", vec![self, value(suffix)])
    }

    pub fn contains(self, needle: impl Into<String>) -> PredicateExpr {
        let needle: String = needle.into();
        PredicateExpr::call("contains", vec![self, value(needle)])
    }
}
