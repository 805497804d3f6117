//! Parameterized SELECT construction.
//!
//! Every predicate is pushed through a single builder call that appends the
//! clause text and its bound values together, so placeholders and parameters
//! can never drift out of alignment. Only `&'static str` column names are
//! ever written into the SQL text; caller-provided values are always bound.

use rusqlite::types::Value;

use crate::error::{CatalogError, CatalogResult};

/// A finished query: SQL text plus parameters in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Builder for `SELECT ... WHERE ... ORDER BY ...` statements.
#[derive(Debug)]
pub struct QueryBuilder {
    base: String,
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl QueryBuilder {
    /// Start from a base projection such as `SELECT id, name FROM races`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            clauses: Vec::new(),
            params: Vec::new(),
        }
    }

    /// `column = ?`
    pub fn eq(&mut self, column: &'static str, value: impl Into<Value>) -> &mut Self {
        self.clauses.push(format!("{} = ?", column));
        self.params.push(value.into());
        self
    }

    /// `column LIKE ?` matching any value containing `needle` literally.
    pub fn contains(&mut self, column: &'static str, needle: &str) -> &mut Self {
        self.clauses.push(format!("{} LIKE ? ESCAPE '\\'", column));
        self.params
            .push(Value::Text(format!("%{}%", escape_like(needle))));
        self
    }

    /// `column IN (?, ?, ...)` with one placeholder per value.
    ///
    /// An empty set adds no clause.
    pub fn in_list<I, V>(&mut self, column: &'static str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let start = self.params.len();
        self.params.extend(values.into_iter().map(Into::into));
        let count = self.params.len() - start;
        if count > 0 {
            let placeholders = vec!["?"; count].join(",");
            self.clauses
                .push(format!("{} IN ({})", column, placeholders));
        }
        self
    }

    /// Append the WHERE and ORDER BY clauses and finish the query.
    pub fn order_by(self, column: &'static str) -> SelectQuery {
        let mut sql = self.base;
        if !self.clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(column);

        SelectQuery {
            sql,
            params: self.params,
        }
    }
}

/// Resolve a requested sort field against a catalog's allow-list.
///
/// Matching is case-insensitive and yields the canonical column name.
/// No request yields `default`; an unknown field is a validation error.
pub fn resolve_order_by(
    requested: Option<&str>,
    allowed: &[&'static str],
    default: &'static str,
) -> CatalogResult<&'static str> {
    let Some(requested) = requested else {
        return Ok(default);
    };

    allowed
        .iter()
        .find(|column| column.eq_ignore_ascii_case(requested))
        .copied()
        .ok_or(CatalogError::InvalidOrderBy)
}

/// Escape LIKE metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
