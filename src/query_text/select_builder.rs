//! SELECT clause: per-row projections, or one of the terminal forms
//! (wildcard, TOP(n), COUNT()).

use serde::{Deserialize, Serialize};

use crate::condition_tree::{terms, ToQueryText};
use crate::errors::QueryBuildError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Whole entity: `SELECT t`.
    Alias(String),
    /// One property, already mapped to its wire name: `SELECT t.Temperature`.
    Property { alias: String, property: String },
}

impl Projection {
    fn render(&self) -> String {
        match self {
            Projection::Alias(alias) => alias.clone(),
            Projection::Property { alias, property } => format!("{alias}.{property}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectClause {
    projections: Vec<Projection>,
    wildcard: bool,
    top: Option<u32>,
    count_all: bool,
}

impl SelectClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty() && !self.wildcard && self.top.is_none() && !self.count_all
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Add a projection. Selecting the same whole-entity alias twice, or
    /// the same alias.property pair twice, is a duplicate.
    pub fn add_projection(&mut self, projection: Projection) -> Result<(), QueryBuildError> {
        self.reject_terminal_form("a projection")?;
        let duplicate = match &projection {
            Projection::Alias(alias) => self.projections.iter().any(|existing| match existing {
                Projection::Alias(a) => a == alias,
                Projection::Property { alias: a, .. } => a == alias,
            }),
            Projection::Property { alias, property } => {
                self.projections.iter().any(|existing| match existing {
                    Projection::Alias(a) => a == alias,
                    Projection::Property {
                        alias: a,
                        property: p,
                    } => a == alias && p == property,
                })
            }
        };
        if duplicate {
            let name = match &projection {
                Projection::Alias(alias) => alias.clone(),
                Projection::Property { alias, .. } => alias.clone(),
            };
            return Err(QueryBuildError::DuplicateAlias(name));
        }
        self.projections.push(projection);
        Ok(())
    }

    pub fn set_wildcard(&mut self) -> Result<(), QueryBuildError> {
        self.reject_terminal_form("*")?;
        if !self.projections.is_empty() {
            return Err(QueryBuildError::InvalidClauseCombination(
                "SELECT * cannot be combined with explicit projections".to_string(),
            ));
        }
        self.wildcard = true;
        Ok(())
    }

    /// TOP(n) is a terminal select form; it cannot be combined with per-row
    /// projections.
    pub fn set_top(&mut self, count: u32) -> Result<(), QueryBuildError> {
        if self.count_all {
            return Err(QueryBuildError::InvalidClauseCombination(
                "TOP cannot be combined with COUNT".to_string(),
            ));
        }
        if self.wildcard {
            return Err(QueryBuildError::InvalidClauseCombination(
                "TOP cannot be combined with SELECT *".to_string(),
            ));
        }
        if !self.projections.is_empty() {
            return Err(QueryBuildError::InvalidClauseCombination(
                "TOP cannot be combined with explicit projections".to_string(),
            ));
        }
        self.top = Some(count);
        Ok(())
    }

    /// COUNT() is a terminal select form.
    pub fn set_count_all(&mut self) -> Result<(), QueryBuildError> {
        if self.top.is_some() {
            return Err(QueryBuildError::InvalidClauseCombination(
                "COUNT cannot be combined with TOP".to_string(),
            ));
        }
        if !self.projections.is_empty() || self.wildcard {
            return Err(QueryBuildError::InvalidClauseCombination(
                "COUNT cannot be combined with projections".to_string(),
            ));
        }
        self.count_all = true;
        Ok(())
    }

    fn reject_terminal_form(&self, what: &str) -> Result<(), QueryBuildError> {
        if self.count_all {
            return Err(QueryBuildError::InvalidClauseCombination(format!(
                "cannot add {what} to a COUNT query"
            )));
        }
        if self.top.is_some() {
            return Err(QueryBuildError::InvalidClauseCombination(format!(
                "cannot add {what} to a TOP query"
            )));
        }
        if self.wildcard {
            return Err(QueryBuildError::InvalidClauseCombination(format!(
                "cannot add {what} to a SELECT * query"
            )));
        }
        Ok(())
    }
}

impl ToQueryText for SelectClause {
    fn to_query_text(&self) -> String {
        if self.count_all {
            return format!("{} {}()", terms::SELECT, terms::COUNT);
        }
        if let Some(count) = self.top {
            return format!("{} {}({})", terms::SELECT, terms::TOP, count);
        }
        if self.wildcard {
            return format!("{} {}", terms::SELECT, terms::STAR);
        }
        if self.projections.is_empty() {
            return String::new();
        }
        let items = self
            .projections
            .iter()
            .map(Projection::render)
            .collect::<Vec<String>>()
            .join(", ");
        format!("{} {}", terms::SELECT, items)
    }
}
