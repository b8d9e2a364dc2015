//! Per-query alias bindings.
//!
//! Every alias used in a query must be bound exactly once, by the FROM
//! clause or by a JOIN traversal. The registry is owned by one `Query` and
//! consulted by every clause mutation and by the predicate translator.

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::QueryBuildError;
use crate::model_catalog::ModelSchema;

/// What a bound alias refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    Twin,
    Relationship,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasBinding {
    pub kind: AliasKind,
    /// Schema of the model bound to this alias. Relationship aliases and
    /// untyped twin collections carry no schema; property references
    /// against them pass through unvalidated.
    pub model: Option<Arc<ModelSchema>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasRegistry {
    bindings: HashMap<String, AliasBinding>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an alias. Aliases are unique across FROM and every JOIN hop.
    pub fn bind(
        &mut self,
        alias: &str,
        kind: AliasKind,
        model: Option<Arc<ModelSchema>>,
    ) -> Result<(), QueryBuildError> {
        if self.bindings.contains_key(alias) {
            return Err(QueryBuildError::DuplicateAlias(alias.to_string()));
        }
        self.bindings
            .insert(alias.to_string(), AliasBinding { kind, model });
        Ok(())
    }

    pub fn resolve(&self, alias: &str) -> Result<&AliasBinding, QueryBuildError> {
        self.bindings
            .get(alias)
            .ok_or_else(|| QueryBuildError::UnknownAlias(alias.to_string()))
    }

    pub fn is_bound(&self, alias: &str) -> bool {
        self.bindings.contains_key(alias)
    }

    /// Default alias for a model type name: the name, lowercased.
    pub fn default_alias(type_name: &str) -> String {
        type_name.to_lowercase()
    }
}
