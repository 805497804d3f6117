//! Filtered, sorted, status-derived reads shared by every catalog.
//!
//! A [`Catalog`] describes one table: its projection, sortable columns,
//! how a filter becomes WHERE clauses and how a row becomes a record.
//! [`CatalogRepo`] runs the same pipeline for any of them:
//! build query → execute → map rows.

pub mod query;
pub mod racing;
pub mod sports;
pub mod status;

use chrono::{DateTime, Utc};
use rusqlite::{params_from_iter, Connection, Row};
use std::marker::PhantomData;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::storage::Store;

pub use query::{resolve_order_by, QueryBuilder, SelectQuery};
pub use racing::{RacesFilter, RacesRepo};
pub use sports::EventsRepo;
pub use status::Status;

/// Column set, sort rules and row mapping for one catalog table.
pub trait Catalog {
    type Filter;
    type Record;

    const TABLE: &'static str;
    /// Projection in row-mapping order.
    const COLUMNS: &'static [&'static str];
    /// Columns callers may sort by, lower-case.
    const ORDER_BY_FIELDS: &'static [&'static str];
    const DEFAULT_ORDER_BY: &'static str;

    /// Requested sort field, if any.
    fn order_by(filter: &Self::Filter) -> Option<&str>;

    /// Add one clause per present predicate.
    fn apply_filter(filter: &Self::Filter, query: &mut QueryBuilder);

    /// Decode a row projected with [`Catalog::COLUMNS`].
    fn map_row(row: &Row<'_>, now: DateTime<Utc>) -> rusqlite::Result<Self::Record>;
}

/// `SELECT <columns> FROM <table>`
pub fn base_query<C: Catalog>() -> String {
    format!("SELECT {} FROM {}", C::COLUMNS.join(", "), C::TABLE)
}

/// Turn a filter into a parameterized query.
///
/// The sort field is validated first so an unknown field fails even when
/// the filter carries no predicates.
pub fn build_query<C: Catalog>(filter: &C::Filter) -> CatalogResult<SelectQuery> {
    let order_by = resolve_order_by(
        C::order_by(filter),
        C::ORDER_BY_FIELDS,
        C::DEFAULT_ORDER_BY,
    )?;

    let mut builder = QueryBuilder::new(base_query::<C>());
    C::apply_filter(filter, &mut builder);
    Ok(builder.order_by(order_by))
}

/// Run a built query and map every row.
///
/// Either every row maps or the whole read fails; an empty result is an
/// empty vector.
pub fn execute<C: Catalog>(
    conn: &Connection,
    query: &SelectQuery,
) -> CatalogResult<Vec<C::Record>> {
    let mut stmt = conn.prepare(&query.sql)?;
    let mut rows = stmt.query(params_from_iter(query.params.iter()))?;

    let now = Utc::now();
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let record = C::map_row(row, now).map_err(CatalogError::from_row_error)?;
        records.push(record);
    }

    Ok(records)
}

/// Read-only repository over one catalog table.
pub struct CatalogRepo<C> {
    store: Store,
    _catalog: PhantomData<fn() -> C>,
}

impl<C> Clone for CatalogRepo<C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _catalog: PhantomData,
        }
    }
}

impl<C: Catalog> CatalogRepo<C> {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            _catalog: PhantomData,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Filtered, sorted list of records.
    pub fn list(&self, filter: &C::Filter) -> CatalogResult<Vec<C::Record>> {
        let query = build_query::<C>(filter)?;
        debug!(
            table = C::TABLE,
            sql = %query.sql,
            params = query.params.len(),
            "Executing catalog query"
        );

        self.store.with_conn(|conn| execute::<C>(conn, &query))
    }
}
