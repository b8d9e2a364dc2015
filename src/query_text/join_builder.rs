//! JOIN clause: an ordered sequence of RELATED traversals.

use serde::{Deserialize, Serialize};

use crate::condition_tree::{terms, ToQueryText};

/// Which way the hop walks the relationship. Carried as data for callers
/// that track traversal semantics; rendering ignores it, since the RELATED
/// anchor must always be an alias bound by an earlier clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraversalDirection {
    Outgoing,
    Incoming,
}

/// One RELATED hop. The target alias becomes available to later clauses as
/// soon as the hop is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinTraversal {
    pub source_alias: String,
    pub relationship_alias: String,
    pub target_alias: String,
    pub relationship_name: String,
    pub direction: TraversalDirection,
}

impl JoinTraversal {
    fn render(&self) -> String {
        format!(
            "{} {} {} {}.{} {}",
            terms::JOIN,
            self.target_alias,
            terms::RELATED,
            self.source_alias,
            self.relationship_name,
            self.relationship_alias
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinClause(pub Vec<JoinTraversal>);

impl JoinClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, traversal: JoinTraversal) {
        self.0.push(traversal);
    }
}

impl ToQueryText for JoinClause {
    fn to_query_text(&self) -> String {
        self.0
            .iter()
            .map(JoinTraversal::render)
            .collect::<Vec<String>>()
            .join(" ")
    }
}
