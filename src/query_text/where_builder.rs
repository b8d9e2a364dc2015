//! WHERE clause: zero or one condition tree root.

use serde::{Deserialize, Serialize};

use crate::condition_tree::{terms, ConditionNode, ToQueryText};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhereClause {
    root: Option<ConditionNode>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&ConditionNode> {
        self.root.as_ref()
    }

    /// AND a new condition into the clause. The first condition becomes the
    /// root directly; later ones extend a top-level conjunction.
    pub fn intersect(&mut self, condition: ConditionNode) {
        self.root = Some(match self.root.take() {
            None => condition,
            Some(existing) => existing.intersect(condition),
        });
    }
}

impl ToQueryText for WhereClause {
    fn to_query_text(&self) -> String {
        match &self.root {
            Some(root) => format!("{} {}", terms::WHERE, root.to_query_text()),
            None => String::new(),
        }
    }
}
