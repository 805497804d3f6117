//! Races catalog.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use rusqlite::Row;
use tracing::info;

use super::query::QueryBuilder;
use super::status::Status;
use super::{Catalog, CatalogRepo};
use crate::error::{CatalogError, CatalogResult};
use crate::storage::{create_races_table, seed_races, Store};
use crate::types::{ListRacesRequestFilter, Race};

pub const ID: &str = "id";
pub const MEETING_ID: &str = "meeting_id";
pub const NAME: &str = "name";
pub const NUMBER: &str = "number";
pub const VISIBLE: &str = "visible";
pub const ADVERTISED_START_TIME: &str = "advertised_start_time";

/// Internal race filter.
///
/// Superset of the list filter: lookups by id go through the same query
/// path as listing.
#[derive(Debug, Clone, Default)]
pub struct RacesFilter {
    pub meeting_ids: Vec<i64>,
    pub visible: Option<bool>,
    pub id: Option<i64>,
    pub order_by: Option<String>,
}

impl From<ListRacesRequestFilter> for RacesFilter {
    fn from(filter: ListRacesRequestFilter) -> Self {
        Self {
            meeting_ids: filter.meeting_ids,
            visible: filter.visible,
            id: None,
            order_by: filter.order_by,
        }
    }
}

pub struct RacingCatalog;

impl Catalog for RacingCatalog {
    type Filter = RacesFilter;
    type Record = Race;

    const TABLE: &'static str = "races";
    const COLUMNS: &'static [&'static str] =
        &[ID, MEETING_ID, NAME, NUMBER, VISIBLE, ADVERTISED_START_TIME];
    const ORDER_BY_FIELDS: &'static [&'static str] =
        &[ID, MEETING_ID, NAME, ADVERTISED_START_TIME];
    const DEFAULT_ORDER_BY: &'static str = ADVERTISED_START_TIME;

    fn order_by(filter: &RacesFilter) -> Option<&str> {
        filter.order_by.as_deref()
    }

    fn apply_filter(filter: &RacesFilter, query: &mut QueryBuilder) {
        query.in_list(MEETING_ID, filter.meeting_ids.iter().copied());

        if let Some(visible) = filter.visible {
            query.eq(VISIBLE, visible);
        }

        if let Some(id) = filter.id {
            query.eq(ID, id);
        }
    }

    fn map_row(row: &Row<'_>, now: DateTime<Utc>) -> rusqlite::Result<Race> {
        let advertised_start_time: DateTime<Utc> = row.get(5)?;

        Ok(Race {
            id: row.get(0)?,
            meeting_id: row.get(1)?,
            name: row.get(2)?,
            number: row.get(3)?,
            visible: row.get(4)?,
            advertised_start_time,
            status: Status::at(advertised_start_time, now),
        })
    }
}

/// Repository for races
#[derive(Clone)]
pub struct RacesRepo {
    catalog: CatalogRepo<RacingCatalog>,
}

impl RacesRepo {
    pub fn new(store: Store) -> Self {
        Self {
            catalog: CatalogRepo::new(store),
        }
    }

    /// Create the races table and optionally seed it with dummy races.
    pub fn init<R: Rng>(&self, seed_count: Option<u32>, rng: &mut R) -> Result<()> {
        self.catalog.store().with_conn(|conn| {
            create_races_table(conn)?;
            if let Some(count) = seed_count {
                seed_races(conn, count, Utc::now(), rng)?;
            }
            Ok(())
        })?;

        if let Some(count) = seed_count {
            info!("Races table ready ({} seeded ids)", count);
        }
        Ok(())
    }

    pub fn list(&self, filter: &RacesFilter) -> CatalogResult<Vec<Race>> {
        self.catalog.list(filter)
    }

    /// Fetch a single race by id.
    pub fn get(&self, id: i64) -> CatalogResult<Race> {
        let filter = RacesFilter {
            id: Some(id),
            ..Default::default()
        };
        let races = self.catalog.list(&filter)?;
        debug_assert!(races.len() <= 1, "race id {} is not unique", id);

        races
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound("race does not exist".to_string()))
    }
}
