//! Model metadata supplied by the generated data-model layer.
//!
//! The query builder never inspects twin documents; it only needs, per model
//! type, the identifying model tag and the mapping from declared property
//! names to their JSON wire names and primitive kinds. Callers typically
//! derive this from their generated model classes and hand it over as an
//! explicit schema object.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Primitive kind of a declared twin property. The kind gates which
/// operators a predicate may apply and how literals are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Bool,
    Integer,
    Float,
    Decimal,
    String,
}

impl PropertyKind {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            PropertyKind::Integer | PropertyKind::Float | PropertyKind::Decimal
        )
    }

    pub fn is_string(self) -> bool {
        matches!(self, PropertyKind::String)
    }
}

/// One declared property: its JSON wire name (what the rendered query text
/// uses) and its primitive kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub wire_name: String,
    pub kind: PropertyKind,
}

/// Schema of one twin model type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Model type name, e.g. "Room". The default query alias is derived
    /// from it by lowercasing.
    pub name: String,
    /// Identifying model tag, e.g. "dtmi:example:Room;1". Used by
    /// IS_OF_MODEL filters.
    pub model_tag: String,
    /// Declared property name -> wire name and kind.
    pub properties: HashMap<String, PropertyDef>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>, model_tag: impl Into<String>) -> Self {
        ModelSchema {
            name: name.into(),
            model_tag: model_tag.into(),
            properties: HashMap::new(),
        }
    }

    /// Declare a property. Builder-style so schemas read as a table.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        wire_name: impl Into<String>,
        kind: PropertyKind,
    ) -> Self {
        self.properties.insert(
            name.into(),
            PropertyDef {
                wire_name: wire_name.into(),
                kind,
            },
        );
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }
}

/// All model schemas known to the caller, keyed by model type name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalog {
    pub models: HashMap<String, ModelSchema>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, schema: ModelSchema) {
        self.models.insert(schema.name.clone(), schema);
    }

    pub fn get(&self, name: &str) -> Option<&ModelSchema> {
        self.models.get(name)
    }

    /// Load a catalog from its JSON form, e.g. emitted by a model code
    /// generator alongside the model classes.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> ModelSchema {
        ModelSchema::new("Room", "dtmi:example:Room;1")
            .with_property("Temperature", "temperature", PropertyKind::Float)
            .with_property("Status", "status", PropertyKind::String)
    }

    #[test]
    fn property_lookup_uses_declared_name() {
        let schema = room();
        let prop = schema.property("Temperature").unwrap();
        assert_eq!(prop.wire_name, "temperature");
        assert_eq!(prop.kind, PropertyKind::Float);
        assert!(schema.property("temperature").is_none());
    }

    #[test]
    fn catalog_round_trips_through_json() {
        let mut catalog = ModelCatalog::new();
        catalog.insert(room());
        let json = serde_json::to_string(&catalog).unwrap();
        let restored = ModelCatalog::from_json(&json).unwrap();
        assert_eq!(restored, catalog);
        assert_eq!(
            restored.get("Room").unwrap().model_tag,
            "dtmi:example:Room;1"
        );
    }

    #[test]
    fn kind_predicates() {
        assert!(PropertyKind::Integer.is_numeric());
        assert!(PropertyKind::Decimal.is_numeric());
        assert!(!PropertyKind::String.is_numeric());
        assert!(PropertyKind::String.is_string());
        assert!(!PropertyKind::Bool.is_string());
    }
}
