//! Racing and sports service façades.
//!
//! Translate API requests into catalog filters and wrap the results.

use anyhow::Result;
use rand::thread_rng;
use std::path::Path;
use tracing::{debug, error, info};

use crate::catalog::{EventsRepo, RacesFilter, RacesRepo};
use crate::config::DatabaseConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::storage::Store;
use crate::types::{
    GetRaceRequest, ListEventsRequest, ListEventsResponse, ListRacesRequest, ListRacesResponse,
    Race,
};

/// Racing service
#[derive(Clone)]
pub struct RacingService {
    repo: RacesRepo,
}

impl RacingService {
    pub fn new(repo: RacesRepo) -> Self {
        Self { repo }
    }

    /// List races matching the request filter.
    pub fn list_races(&self, req: ListRacesRequest) -> CatalogResult<ListRacesResponse> {
        let filter: RacesFilter = req.filter.unwrap_or_default().into();
        let races = self.repo.list(&filter).map_err(|e| log_failure("list_races", e))?;
        Ok(ListRacesResponse { races })
    }

    /// Fetch a single race by id.
    pub fn get_race(&self, req: GetRaceRequest) -> CatalogResult<Race> {
        self.repo
            .get(req.id)
            .map_err(|e| log_failure("get_race", e))
    }
}

/// Sports service
#[derive(Clone)]
pub struct SportsService {
    repo: EventsRepo,
}

impl SportsService {
    pub fn new(repo: EventsRepo) -> Self {
        Self { repo }
    }

    /// List sport events matching the request filter.
    pub fn list_events(&self, req: ListEventsRequest) -> CatalogResult<ListEventsResponse> {
        let filter = req.filter.unwrap_or_default();
        let events = self
            .repo
            .list(&filter)
            .map_err(|e| log_failure("list_events", e))?;
        Ok(ListEventsResponse { events })
    }
}

/// Caller errors are expected traffic; everything else is an infrastructure fault.
fn log_failure(operation: &str, err: CatalogError) -> CatalogError {
    if err.is_client_error() {
        debug!("{} rejected: {}", operation, err);
    } else {
        error!("{} failed: {}", operation, err);
    }
    err
}

/// Open both catalog databases, create their schemas and seed them.
///
/// Runs once at startup, before any request is served.
pub fn open_services(config: &DatabaseConfig) -> Result<(RacingService, SportsService)> {
    let seed_count = config.seed.then_some(config.seed_count);
    let mut rng = thread_rng();

    info!("Opening racing database: {}", config.racing_path);
    let races = RacesRepo::new(Store::open(Path::new(&config.racing_path))?);
    races.init(seed_count, &mut rng)?;

    info!("Opening sports database: {}", config.sports_path);
    let events = EventsRepo::new(Store::open(Path::new(&config.sports_path))?);
    events.init(seed_count, &mut rng)?;

    Ok((RacingService::new(races), SportsService::new(events)))
}

/// Open an existing racing database for queries only.
pub fn open_racing_reader(config: &DatabaseConfig) -> Result<RacingService> {
    debug!("Opening racing database read-only: {}", config.racing_path);
    let store = Store::open_read_only(Path::new(&config.racing_path))?;
    Ok(RacingService::new(RacesRepo::new(store)))
}

/// Open an existing sports database for queries only.
pub fn open_sports_reader(config: &DatabaseConfig) -> Result<SportsService> {
    debug!("Opening sports database read-only: {}", config.sports_path);
    let store = Store::open_read_only(Path::new(&config.sports_path))?;
    Ok(SportsService::new(EventsRepo::new(store)))
}
