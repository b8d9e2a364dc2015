//! Literal rendering with the target language's quoting and escaping rules.
//!
//! `QueryLiteral` is the closed set of scalar values the language can
//! express. Conversion from a caller-supplied `serde_json::Value` is the
//! single place where unsupported runtime types are rejected; once a
//! `QueryLiteral` exists, rendering it cannot fail.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::QueryBuildError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryLiteral {
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// Arbitrary-precision decimal, carried as its textual form. Rendered
    /// single-quoted like strings, per the language's decimal convention.
    Decimal(String),
    String(String),
    Null,
}

impl QueryLiteral {
    /// Render this literal as query text. Numerics and booleans render in
    /// their canonical unquoted form; strings and decimals single-quoted
    /// with embedded quotes escaped.
    pub fn render(&self) -> String {
        match self {
            QueryLiteral::Bool(b) => b.to_string(),
            QueryLiteral::Integer(i) => i.to_string(),
            QueryLiteral::Float(f) => f.to_string(),
            QueryLiteral::Decimal(d) => format!("'{}'", escape_quotes(d)),
            QueryLiteral::String(s) => format!("'{}'", escape_quotes(s)),
            QueryLiteral::Null => "null".to_string(),
        }
    }

    /// Render a membership value list: element renderings joined with `,`.
    /// The surrounding operator supplies the brackets.
    pub fn render_list(values: &[QueryLiteral]) -> String {
        values
            .iter()
            .map(QueryLiteral::render)
            .collect::<Vec<String>>()
            .join(",")
    }

    /// Convert a caller-supplied JSON value into a scalar literal.
    /// Arrays and objects are never valid in scalar position.
    pub fn from_scalar(value: &Value) -> Result<Self, QueryBuildError> {
        match value {
            Value::Bool(b) => Ok(QueryLiteral::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(QueryLiteral::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(QueryLiteral::Float(f))
                } else {
                    // u64 beyond i64::MAX has no representation in the
                    // target language's integer range.
                    Err(QueryBuildError::UnsupportedLiteralType(format!(
                        "number {n} is out of the supported integer range"
                    )))
                }
            }
            Value::String(s) => Ok(QueryLiteral::String(s.clone())),
            Value::Null => Ok(QueryLiteral::Null),
            Value::Array(_) => Err(QueryBuildError::UnsupportedLiteralType(
                "array (only valid as the operand of IN/NIN)".to_string(),
            )),
            Value::Object(_) => Err(QueryBuildError::UnsupportedLiteralType(
                "object (complex values are not valid literals)".to_string(),
            )),
        }
    }
}

/// Escape embedded single quotes so rendered text can never break out of
/// its quoted literal.
pub fn escape_quotes(raw: &str) -> String {
    raw.replace('\'', "\\'")
}
