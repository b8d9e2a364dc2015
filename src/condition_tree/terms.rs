//! Fixed vocabulary of the target query language.
//!
//! Keywords and operator spellings must be reproduced byte-for-byte in the
//! rendered text; everything here is pure data. The scalar-test table maps
//! the DSL's method-style test names to their language operators, in the
//! same spirit as a function registry: one static table, one lookup.

use std::collections::HashMap;

use super::{BinaryStringOp, UnaryScalarOp};

pub const SELECT: &str = "SELECT";
pub const FROM: &str = "FROM";
pub const WHERE: &str = "WHERE";
pub const JOIN: &str = "JOIN";
pub const RELATED: &str = "RELATED";
pub const TOP: &str = "TOP";
pub const COUNT: &str = "COUNT";
pub const IN: &str = "IN";
pub const NIN: &str = "NIN";
pub const IS_OF_MODEL: &str = "IS_OF_MODEL";
pub const AND: &str = "AND";
pub const OR: &str = "OR";
pub const NOT: &str = "NOT";
pub const DIGITALTWINS: &str = "DIGITALTWINS";
pub const RELATIONSHIPS: &str = "RELATIONSHIPS";
pub const STAR: &str = "*";

/// A whitelisted scalar test reachable from the predicate DSL as a
/// method-style call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarTest {
    Unary(UnaryScalarOp),
    Binary(BinaryStringOp),
}

lazy_static::lazy_static! {
    static ref SCALAR_TESTS: HashMap<&'static str, ScalarTest> = {
        let mut m = HashMap::new();
        m.insert("is_bool", ScalarTest::Unary(UnaryScalarOp::IsBool));
        m.insert("is_defined", ScalarTest::Unary(UnaryScalarOp::IsDefined));
        m.insert("is_null", ScalarTest::Unary(UnaryScalarOp::IsNull));
        m.insert("is_number", ScalarTest::Unary(UnaryScalarOp::IsNumber));
        m.insert("is_object", ScalarTest::Unary(UnaryScalarOp::IsObject));
        m.insert("is_string", ScalarTest::Unary(UnaryScalarOp::IsString));
        m.insert("is_primitive", ScalarTest::Unary(UnaryScalarOp::IsPrimitive));
        m.insert("ends_with", ScalarTest::Binary(BinaryStringOp::EndsWith));
        m.insert("starts_with", ScalarTest::Binary(BinaryStringOp::StartsWith));
        m.insert("contains", ScalarTest::Binary(BinaryStringOp::Contains));
        m
    };
}

/// Look up a scalar test by its DSL method name. `None` means the call is
/// outside the supported grammar.
pub fn scalar_test(name: &str) -> Option<ScalarTest> {
    SCALAR_TESTS.get(name).copied()
}
