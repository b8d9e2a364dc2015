//! FROM clause: exactly one target collection, optionally aliased.

use serde::{Deserialize, Serialize};

use crate::condition_tree::{terms, ToQueryText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TwinCollection {
    DigitalTwins,
    Relationships,
}

impl TwinCollection {
    pub fn keyword(self) -> &'static str {
        match self {
            TwinCollection::DigitalTwins => terms::DIGITALTWINS,
            TwinCollection::Relationships => terms::RELATIONSHIPS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromClause {
    pub collection: TwinCollection,
    pub alias: Option<String>,
}

impl ToQueryText for FromClause {
    fn to_query_text(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} {} {}", terms::FROM, self.collection.keyword(), alias),
            None => format!("{} {}", terms::FROM, self.collection.keyword()),
        }
    }
}
