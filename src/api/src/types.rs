//! Request and response types for the catalog API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Status;

/// A race as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub id: i64,
    pub meeting_id: i64,
    pub name: String,
    pub number: i64,
    pub visible: bool,
    pub advertised_start_time: DateTime<Utc>,
    /// Derived at read time, never stored
    pub status: Status,
}

/// A sporting event as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub sport: String,
    pub location: String,
    pub advertised_start_time: DateTime<Utc>,
    /// Derived at read time, never stored
    pub status: Status,
}

/// Filter accepted by the race list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRacesRequestFilter {
    #[serde(default)]
    pub meeting_ids: Vec<i64>,
    #[serde(default)]
    pub visible: Option<bool>,
    /// Sort column, matched case-insensitively
    #[serde(default)]
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRacesRequest {
    #[serde(default)]
    pub filter: Option<ListRacesRequestFilter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRacesResponse {
    pub races: Vec<Race>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GetRaceRequest {
    pub id: i64,
}

/// Filter accepted by the event list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsFilter {
    /// Substring of the event name
    #[serde(default)]
    pub name: Option<String>,
    /// Exact sport name
    #[serde(default)]
    pub sport: Option<String>,
    /// Sort column, matched case-insensitively
    #[serde(default)]
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListEventsRequest {
    #[serde(default)]
    pub filter: Option<EventsFilter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEventsResponse {
    pub events: Vec<Event>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
