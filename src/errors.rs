use thiserror::Error;

/// Build-time failures raised while mutating a query or translating a
/// predicate. Rendering never fails: by the time `build_query` runs, every
/// clause holds a structurally valid tree.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryBuildError {
    #[error("Alias '{0}' is already bound in this query")]
    DuplicateAlias(String),

    #[error("Alias '{0}' is not bound by any FROM or JOIN clause")]
    UnknownAlias(String),

    #[error("'{0}' is not a serializable property of the model bound to its alias")]
    NoSerializableProperty(String),

    #[error("Operator {0} has no equivalent in the twin query language")]
    UnsupportedOperator(String),

    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(String),

    #[error("Unsupported literal type: {0} (valid scalars are booleans, numbers, strings and null)")]
    UnsupportedLiteralType(String),

    #[error("Invalid clause combination: {0}")]
    InvalidClauseCombination(String),
}
