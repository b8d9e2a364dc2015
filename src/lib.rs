//! twinql - query construction for the digital-twin graph query language
//!
//! This crate turns a structured description of which twins and
//! relationships to fetch, and under what conditions, into a well-formed
//! query string:
//! - a fluent predicate DSL instead of hand-written condition text,
//! - a condition tree with explicit logical grouping and injection-safe
//!   literal rendering,
//! - clause builders for SELECT / FROM / JOIN ... RELATED / WHERE,
//! - a query assembler producing the final text.
//!
//! Executing the produced string against a graph database, and
//! de/serializing the documents it returns, are the caller's concern.
//!
//! ```
//! use twinql::{property, ModelSchema, PropertyKind, Query};
//!
//! let room = ModelSchema::new("Room", "dtmi:example:Room;1")
//!     .with_property("Temperature", "Temperature", PropertyKind::Float)
//!     .with_property("Status", "Status", PropertyKind::String);
//!
//! let mut query = Query::from_twins_model(&room, Some("t"));
//! query
//!     .where_predicate(&property("t", "Temperature").gt(50))
//!     .unwrap()
//!     .where_predicate(&property("t", "Status").eq("Active"))
//!     .unwrap();
//! assert_eq!(
//!     query.build_query(),
//!     "FROM DIGITALTWINS t WHERE t.Temperature > 50 AND t.Status = 'Active'"
//! );
//! ```

pub mod alias_registry;
pub mod condition_tree;
pub mod errors;
pub mod model_catalog;
pub mod predicate_dsl;
pub mod query_text;

pub use alias_registry::{AliasKind, AliasRegistry};
pub use condition_tree::literal::QueryLiteral;
pub use condition_tree::translate::PredicateTranslator;
pub use condition_tree::{
    BinaryStringOp, ComparisonOp, ConditionNode, LogicalOp, PropertyRef, ToQueryText,
    UnaryScalarOp,
};
pub use errors::QueryBuildError;
pub use model_catalog::{ModelCatalog, ModelSchema, PropertyDef, PropertyKind};
pub use predicate_dsl::{decimal, not, of_model, property, value, PredicateExpr, PredicateOp};
pub use query_text::from_builder::TwinCollection;
pub use query_text::join_builder::{JoinTraversal, TraversalDirection};
pub use query_text::{CountAllTwins, Query};
