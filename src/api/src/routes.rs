//! API route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::CatalogError;
use crate::service::{RacingService, SportsService};
use crate::types::{
    ErrorResponse, GetRaceRequest, HealthResponse, ListEventsRequest, ListEventsResponse,
    ListRacesRequest, ListRacesResponse, Race,
};

/// Application state shared across handlers.
pub struct AppState {
    pub racing: RacingService,
    pub sports: SportsService,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::InvalidOrderBy => ApiError::bad_request(message),
            CatalogError::NotFound(_) => ApiError::not_found(message),
            _ => ApiError::internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/list-races", post(list_races))
        .route("/v1/races/{id}", get(get_race))
        .route("/v1/list-events", post(list_events))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn list_races(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListRacesRequest>,
) -> Result<Json<ListRacesResponse>, ApiError> {
    Ok(Json(state.racing.list_races(req)?))
}

pub async fn get_race(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Race>, ApiError> {
    Ok(Json(state.racing.get_race(GetRaceRequest { id })?))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListEventsRequest>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    Ok(Json(state.sports.list_events(req)?))
}
