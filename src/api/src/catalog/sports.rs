//! Sport events catalog.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use rusqlite::Row;
use tracing::info;

use super::query::QueryBuilder;
use super::status::Status;
use super::{Catalog, CatalogRepo};
use crate::error::CatalogResult;
use crate::storage::{create_sport_events_table, seed_events, Store};
use crate::types::{Event, EventsFilter};

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const SPORT: &str = "sport";
pub const LOCATION: &str = "location";
pub const ADVERTISED_START_TIME: &str = "advertised_start_time";

pub struct SportsCatalog;

impl Catalog for SportsCatalog {
    type Filter = EventsFilter;
    type Record = Event;

    const TABLE: &'static str = "sport_events";
    const COLUMNS: &'static [&'static str] = &[ID, NAME, SPORT, LOCATION, ADVERTISED_START_TIME];
    const ORDER_BY_FIELDS: &'static [&'static str] =
        &[ID, NAME, SPORT, LOCATION, ADVERTISED_START_TIME];
    const DEFAULT_ORDER_BY: &'static str = ADVERTISED_START_TIME;

    fn order_by(filter: &EventsFilter) -> Option<&str> {
        filter.order_by.as_deref()
    }

    fn apply_filter(filter: &EventsFilter, query: &mut QueryBuilder) {
        if let Some(name) = &filter.name {
            query.contains(NAME, name);
        }

        if let Some(sport) = &filter.sport {
            query.eq(SPORT, sport.clone());
        }
    }

    fn map_row(row: &Row<'_>, now: DateTime<Utc>) -> rusqlite::Result<Event> {
        let advertised_start_time: DateTime<Utc> = row.get(4)?;

        Ok(Event {
            id: row.get(0)?,
            name: row.get(1)?,
            sport: row.get(2)?,
            location: row.get(3)?,
            advertised_start_time,
            status: Status::at(advertised_start_time, now),
        })
    }
}

/// Repository for sport events
#[derive(Clone)]
pub struct EventsRepo {
    catalog: CatalogRepo<SportsCatalog>,
}

impl EventsRepo {
    pub fn new(store: Store) -> Self {
        Self {
            catalog: CatalogRepo::new(store),
        }
    }

    /// Create the sport_events table and optionally seed it.
    pub fn init<R: Rng>(&self, seed_count: Option<u32>, rng: &mut R) -> Result<()> {
        self.catalog.store().with_conn(|conn| {
            create_sport_events_table(conn)?;
            if let Some(count) = seed_count {
                seed_events(conn, count, Utc::now(), rng)?;
            }
            Ok(())
        })?;

        if let Some(count) = seed_count {
            info!("Sport events table ready ({} seeded ids)", count);
        }
        Ok(())
    }

    pub fn list(&self, filter: &EventsFilter) -> CatalogResult<Vec<Event>> {
        self.catalog.list(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_query;
    use crate::error::CatalogError;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rusqlite::params;
    use rusqlite::types::Value;

    fn create_repo() -> EventsRepo {
        let repo = EventsRepo::new(Store::in_memory().unwrap());
        repo.init(Some(100), &mut StdRng::seed_from_u64(3)).unwrap();
        repo
    }

    fn insert_event(repo: &EventsRepo, id: i64, name: &str, sport: &str) {
        repo.catalog
            .store()
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO sport_events (id, name, sport, location, advertised_start_time)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![id, name, sport, "Perth", Utc::now() + Duration::days(1)],
                )?;
                Ok(())
            })
            .unwrap();
    }

    fn order_by(field: &str) -> EventsFilter {
        EventsFilter {
            order_by: Some(field.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_query_with_name_and_sport() {
        let filter = EventsFilter {
            name: Some("Cup".to_string()),
            sport: Some("Tennis".to_string()),
            order_by: Some("LOCATION".to_string()),
        };
        let query = build_query::<SportsCatalog>(&filter).unwrap();

        assert_eq!(
            query.sql,
            "SELECT id, name, sport, location, advertised_start_time FROM sport_events \
             WHERE name LIKE ? ESCAPE '\\' AND sport = ? ORDER BY location"
        );
        assert_eq!(
            query.params,
            vec![
                Value::Text("%Cup%".to_string()),
                Value::Text("Tennis".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_all() {
        let repo = create_repo();
        let events = repo.list(&EventsFilter::default()).unwrap();
        assert_eq!(events.len(), 100, "There should be a total of 100 events in DB.");
    }

    #[test]
    fn test_name_substring_filter() {
        let repo = create_repo();
        let all = repo.list(&EventsFilter::default()).unwrap();
        let target = &all[17];
        let len = target.name.chars().count();
        let needle: String = target.name.chars().skip(1).take(len.saturating_sub(3)).collect();

        let filter = EventsFilter {
            name: Some(needle.clone()),
            ..Default::default()
        };
        let events = repo.list(&filter).unwrap();
        assert!(events.iter().any(|e| e.id == target.id));
        for event in &events {
            assert!(
                event.name.to_lowercase().contains(&needle.to_lowercase()),
                "Event {} does not contain {}",
                event.id,
                needle
            );
        }
    }

    #[test]
    fn test_name_filter_absent_value() {
        let repo = create_repo();
        let filter = EventsFilter {
            name: Some("zzqx-not-an-event".to_string()),
            ..Default::default()
        };
        assert!(repo.list(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_name_filter_is_literal() {
        let repo = EventsRepo::new(Store::in_memory().unwrap());
        repo.init(None, &mut StdRng::seed_from_u64(3)).unwrap();
        insert_event(&repo, 1, "Half_Time Show", "Soccer");
        insert_event(&repo, 2, "HalfXTime Show", "Soccer");
        insert_event(&repo, 3, "100% Effort", "Rugby");

        let events = repo
            .list(&EventsFilter {
                name: Some("Half_Time".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, 1);

        let events = repo
            .list(&EventsFilter {
                name: Some("%".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, 3);
    }

    #[test]
    fn test_sport_filter_is_exact() {
        let repo = create_repo();
        let all = repo.list(&EventsFilter::default()).unwrap();
        let sport = all[0].sport.clone();

        let filter = EventsFilter {
            sport: Some(sport.clone()),
            ..Default::default()
        };
        let events = repo.list(&filter).unwrap();
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.sport == sport));
        assert_eq!(events.len(), all.iter().filter(|e| e.sport == sport).count());
    }

    #[test]
    fn test_sort_by_each_allowed_field() {
        let repo = create_repo();

        let events = repo.list(&order_by("ID")).unwrap();
        assert!(events.windows(2).all(|p| p[0].id <= p[1].id));

        let events = repo.list(&order_by("name")).unwrap();
        assert!(events.windows(2).all(|p| p[0].name <= p[1].name));

        let events = repo.list(&order_by("Sport")).unwrap();
        assert!(events.windows(2).all(|p| p[0].sport <= p[1].sport));

        let events = repo.list(&order_by("location")).unwrap();
        assert!(events.windows(2).all(|p| p[0].location <= p[1].location));

        let events = repo.list(&EventsFilter::default()).unwrap();
        assert!(events
            .windows(2)
            .all(|p| p[0].advertised_start_time <= p[1].advertised_start_time));
    }

    #[test]
    fn test_sort_by_nonexistent_field() {
        let repo = create_repo();
        let err = repo.list(&order_by("meeting_id")).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidOrderBy));
    }

    #[test]
    fn test_status_field() {
        let repo = create_repo();
        let before = Utc::now().timestamp();
        let events = repo.list(&EventsFilter::default()).unwrap();
        let after = Utc::now().timestamp();

        for event in &events {
            let start = event.advertised_start_time.timestamp();
            match event.status {
                Status::Closed => assert!(start < after),
                Status::Open => assert!(start >= before),
            }
        }
    }
}
