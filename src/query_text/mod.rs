//! Query assembly: the four clause builders plus the terminal query forms.
//!
//! A `Query` owns its clause builders and the per-query alias registry.
//! Every mutation validates eagerly; `build_query` only formats what the
//! mutations already proved well-formed, so rendering is infallible and
//! repeated renders of an unmutated query are byte-identical.

pub mod from_builder;
pub mod join_builder;
pub mod select_builder;
pub mod where_builder;

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::alias_registry::{AliasKind, AliasRegistry};
use crate::condition_tree::translate::PredicateTranslator;
use crate::condition_tree::{terms, ConditionNode, ToQueryText};
use crate::errors::QueryBuildError;
use crate::model_catalog::{ModelCatalog, ModelSchema};
use crate::predicate_dsl::PredicateExpr;

use from_builder::{FromClause, TwinCollection};
use join_builder::{JoinClause, JoinTraversal, TraversalDirection};
use select_builder::{Projection, SelectClause};
use where_builder::WhereClause;

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    select: SelectClause,
    from: FromClause,
    joins: JoinClause,
    where_clause: WhereClause,
    registry: AliasRegistry,
}

impl Query {
    fn new(collection: TwinCollection, alias: &str, model: Option<Arc<ModelSchema>>) -> Self {
        let mut registry = AliasRegistry::new();
        let kind = match collection {
            TwinCollection::DigitalTwins => AliasKind::Twin,
            TwinCollection::Relationships => AliasKind::Relationship,
        };
        // First binding into a fresh registry cannot collide.
        registry
            .bind(alias, kind, model)
            .expect("fresh registry has no bindings");
        Query {
            select: SelectClause::new(),
            from: FromClause {
                collection,
                alias: Some(alias.to_string()),
            },
            joins: JoinClause::new(),
            where_clause: WhereClause::new(),
            registry,
        }
    }

    /// Query over the twin collection, schema-less.
    pub fn from_twins(alias: &str) -> Self {
        Query::new(TwinCollection::DigitalTwins, alias, None)
    }

    /// Query over the twin collection with the alias bound to a model
    /// schema; the default alias is the lowercased model type name.
    pub fn from_twins_model(model: &ModelSchema, alias: Option<&str>) -> Self {
        let derived = AliasRegistry::default_alias(&model.name);
        let alias = alias.unwrap_or(&derived);
        Query::new(
            TwinCollection::DigitalTwins,
            alias,
            Some(Arc::new(model.clone())),
        )
    }

    /// Query over the twin collection for a model looked up by type name
    /// in a catalog. `None` when the catalog declares no such model.
    pub fn from_twins_catalog(
        catalog: &ModelCatalog,
        model_name: &str,
        alias: Option<&str>,
    ) -> Option<Self> {
        catalog
            .get(model_name)
            .map(|model| Query::from_twins_model(model, alias))
    }

    /// Query over the relationship collection.
    pub fn from_relationships(alias: &str) -> Self {
        Query::new(TwinCollection::Relationships, alias, None)
    }

    pub fn alias_registry(&self) -> &AliasRegistry {
        &self.registry
    }

    /// Project a whole entity: `SELECT {alias}`.
    pub fn select(&mut self, alias: &str) -> Result<&mut Self, QueryBuildError> {
        self.registry.resolve(alias)?;
        self.select
            .add_projection(Projection::Alias(alias.to_string()))?;
        Ok(self)
    }

    /// Project one property, validated against the alias's model schema
    /// when one is bound.
    pub fn select_property(
        &mut self,
        alias: &str,
        property: &str,
    ) -> Result<&mut Self, QueryBuildError> {
        let binding = self.registry.resolve(alias)?;
        let wire_name = match &binding.model {
            Some(model) => model
                .property(property)
                .map(|def| def.wire_name.clone())
                .ok_or_else(|| {
                    QueryBuildError::NoSerializableProperty(format!("{alias}.{property}"))
                })?,
            None => property.to_string(),
        };
        self.select.add_projection(Projection::Property {
            alias: alias.to_string(),
            property: wire_name,
        })?;
        Ok(self)
    }

    /// `SELECT *`. Invalid once the query has any JOIN.
    pub fn select_all(&mut self) -> Result<&mut Self, QueryBuildError> {
        if !self.joins.is_empty() {
            return Err(QueryBuildError::InvalidClauseCombination(
                "SELECT * cannot be combined with JOIN".to_string(),
            ));
        }
        self.select.set_wildcard()?;
        Ok(self)
    }

    /// `SELECT TOP(n)`.
    pub fn top(&mut self, count: u32) -> Result<&mut Self, QueryBuildError> {
        self.select.set_top(count)?;
        Ok(self)
    }

    /// `SELECT COUNT()`.
    pub fn count(&mut self) -> Result<&mut Self, QueryBuildError> {
        self.select.set_count_all()?;
        Ok(self)
    }

    /// Add an outgoing RELATED hop to a schema-less target.
    pub fn join_related(
        &mut self,
        source_alias: &str,
        relationship_name: &str,
        target_alias: &str,
        relationship_alias: &str,
    ) -> Result<&mut Self, QueryBuildError> {
        self.join_hop(
            JoinTraversal {
                source_alias: source_alias.to_string(),
                relationship_alias: relationship_alias.to_string(),
                target_alias: target_alias.to_string(),
                relationship_name: relationship_name.to_string(),
                direction: TraversalDirection::Outgoing,
            },
            None,
        )
    }

    /// Add an outgoing RELATED hop whose target alias is bound to a model
    /// schema, making its properties available to predicates and SELECT.
    pub fn join_related_model(
        &mut self,
        source_alias: &str,
        relationship_name: &str,
        target_model: &ModelSchema,
        target_alias: &str,
        relationship_alias: &str,
    ) -> Result<&mut Self, QueryBuildError> {
        self.join_hop(
            JoinTraversal {
                source_alias: source_alias.to_string(),
                relationship_alias: relationship_alias.to_string(),
                target_alias: target_alias.to_string(),
                relationship_name: relationship_name.to_string(),
                direction: TraversalDirection::Outgoing,
            },
            Some(Arc::new(target_model.clone())),
        )
    }

    /// Add an arbitrary traversal: validates the source alias, binds the
    /// relationship and target aliases, then appends the hop.
    pub fn join_hop(
        &mut self,
        traversal: JoinTraversal,
        target_model: Option<Arc<ModelSchema>>,
    ) -> Result<&mut Self, QueryBuildError> {
        if self.select.is_wildcard() {
            return Err(QueryBuildError::InvalidClauseCombination(
                "SELECT * cannot be combined with JOIN".to_string(),
            ));
        }
        self.registry.resolve(&traversal.source_alias)?;
        // Check both new aliases before binding either, so a failed
        // mutation leaves the query untouched.
        if self.registry.is_bound(&traversal.target_alias) {
            return Err(QueryBuildError::DuplicateAlias(
                traversal.target_alias.clone(),
            ));
        }
        if self.registry.is_bound(&traversal.relationship_alias)
            || traversal.relationship_alias == traversal.target_alias
        {
            return Err(QueryBuildError::DuplicateAlias(
                traversal.relationship_alias.clone(),
            ));
        }
        self.registry
            .bind(&traversal.target_alias, AliasKind::Twin, target_model)?;
        self.registry
            .bind(&traversal.relationship_alias, AliasKind::Relationship, None)?;
        self.joins.push(traversal);
        Ok(self)
    }

    /// Translate a predicate and AND it into the WHERE clause.
    pub fn where_predicate(&mut self, expr: &PredicateExpr) -> Result<&mut Self, QueryBuildError> {
        let condition = PredicateTranslator::new(&self.registry).translate(expr)?;
        self.where_clause.intersect(condition);
        Ok(self)
    }

    /// The current WHERE root, if any.
    pub fn condition(&self) -> Option<&ConditionNode> {
        self.where_clause.root()
    }

    /// Render the query. Read-only: recomputes from current clause state
    /// and never mutates or fails.
    pub fn build_query(&self) -> String {
        let clauses = [
            self.select.to_query_text(),
            self.from.to_query_text(),
            self.joins.to_query_text(),
            self.where_clause.to_query_text(),
        ];
        let text = clauses
            .iter()
            .filter(|clause| !clause.is_empty())
            .cloned()
            .collect::<Vec<String>>()
            .join(" ");
        debug!("assembled query: {text}");
        text
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_query())
    }
}

/// Terminal "count all twins" form. It has no clause state and does not
/// compose; it always renders the same text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountAllTwins;

impl CountAllTwins {
    pub fn new() -> Self {
        CountAllTwins
    }

    pub fn build_query(&self) -> String {
        format!(
            "{} {}() {} {}",
            terms::SELECT,
            terms::COUNT,
            terms::FROM,
            terms::DIGITALTWINS
        )
    }
}

impl fmt::Display for CountAllTwins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_catalog::PropertyKind;
    use crate::predicate_dsl::property;

    fn room() -> ModelSchema {
        ModelSchema::new("Room", "dtmi:example:Room;1")
            .with_property("Temperature", "Temperature", PropertyKind::Float)
            .with_property("Status", "Status", PropertyKind::String)
    }

    #[test]
    fn bare_from_query() {
        assert_eq!(Query::from_twins("t").build_query(), "FROM DIGITALTWINS t");
    }

    #[test]
    fn default_alias_is_lowercased_model_name() {
        let query = Query::from_twins_model(&room(), None);
        assert_eq!(query.build_query(), "FROM DIGITALTWINS room");
    }

    #[test]
    fn count_all_twins_is_fixed_text() {
        assert_eq!(
            CountAllTwins::new().build_query(),
            "SELECT COUNT() FROM DIGITALTWINS"
        );
        assert_eq!(
            CountAllTwins::new().to_string(),
            "SELECT COUNT() FROM DIGITALTWINS"
        );
    }

    #[test]
    fn catalog_lookup_binds_the_model_schema() {
        let mut catalog = ModelCatalog::new();
        catalog.insert(room());

        let mut query = Query::from_twins_catalog(&catalog, "Room", None).unwrap();
        query
            .where_predicate(&property("room", "Temperature").gt(50))
            .unwrap();
        assert_eq!(
            query.build_query(),
            "FROM DIGITALTWINS room WHERE room.Temperature > 50"
        );

        assert!(Query::from_twins_catalog(&catalog, "Floor", None).is_none());
    }

    #[test]
    fn select_unknown_alias_fails() {
        let mut query = Query::from_twins("t");
        let err = query.select("x").unwrap_err();
        assert_eq!(err, QueryBuildError::UnknownAlias("x".to_string()));
    }

    #[test]
    fn select_property_validates_against_model() {
        let mut query = Query::from_twins_model(&room(), Some("t"));
        query.select_property("t", "Temperature").unwrap();
        assert_eq!(
            query.build_query(),
            "SELECT t.Temperature FROM DIGITALTWINS t"
        );

        let mut query = Query::from_twins_model(&room(), Some("t"));
        let err = query.select_property("t", "Pressure").unwrap_err();
        assert_eq!(
            err,
            QueryBuildError::NoSerializableProperty("t.Pressure".to_string())
        );
    }

    #[test]
    fn join_binds_target_and_relationship_aliases() {
        let mut query = Query::from_twins("building");
        query
            .join_related("building", "contains", "floor", "r1")
            .unwrap();
        assert!(query.alias_registry().is_bound("floor"));
        assert!(query.alias_registry().is_bound("r1"));
        assert_eq!(
            query.build_query(),
            "FROM DIGITALTWINS building JOIN floor RELATED building.contains r1"
        );
    }

    #[test]
    fn join_target_alias_collision_fails() {
        let mut query = Query::from_twins("t");
        let err = query.join_related("t", "contains", "t", "r").unwrap_err();
        assert_eq!(err, QueryBuildError::DuplicateAlias("t".to_string()));
    }

    #[test]
    fn join_from_unknown_source_fails() {
        let mut query = Query::from_twins("t");
        let err = query.join_related("x", "contains", "y", "r").unwrap_err();
        assert_eq!(err, QueryBuildError::UnknownAlias("x".to_string()));
    }

    #[test]
    fn wildcard_select_with_join_fails_in_either_order() {
        let mut query = Query::from_twins("t");
        query.select_all().unwrap();
        let err = query.join_related("t", "contains", "s", "r").unwrap_err();
        assert!(matches!(err, QueryBuildError::InvalidClauseCombination(_)));

        let mut query = Query::from_twins("t");
        query.join_related("t", "contains", "s", "r").unwrap();
        let err = query.select_all().unwrap_err();
        assert!(matches!(err, QueryBuildError::InvalidClauseCombination(_)));
    }

    #[test]
    fn top_after_wildcard_select_fails_and_keeps_the_wildcard() {
        let mut query = Query::from_twins("t");
        query.select_all().unwrap();
        let err = query.top(5).unwrap_err();
        assert!(matches!(err, QueryBuildError::InvalidClauseCombination(_)));
        assert_eq!(query.build_query(), "SELECT * FROM DIGITALTWINS t");
    }

    #[test]
    fn where_predicate_appends_with_and() {
        let mut query = Query::from_twins_model(&room(), Some("t"));
        query
            .where_predicate(&property("t", "Temperature").gt(50))
            .unwrap()
            .where_predicate(&property("t", "Status").eq("Active"))
            .unwrap();
        assert_eq!(
            query.build_query(),
            "FROM DIGITALTWINS t WHERE t.Temperature > 50 AND t.Status = 'Active'"
        );
    }

    #[test]
    fn failed_where_leaves_query_unchanged() {
        let mut query = Query::from_twins_model(&room(), Some("t"));
        let before = query.build_query();
        let err = query
            .where_predicate(&property("t", "Pressure").gt(1))
            .unwrap_err();
        assert_eq!(
            err,
            QueryBuildError::NoSerializableProperty("t.Pressure".to_string())
        );
        assert_eq!(query.build_query(), before);
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut query = Query::from_twins_model(&room(), Some("t"));
        query
            .select("t")
            .unwrap()
            .where_predicate(&property("t", "Temperature").gt(50))
            .unwrap();
        assert_eq!(query.build_query(), query.build_query());
        assert_eq!(query.to_string(), query.build_query());
    }
}
