//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::domain::SiteId;

use super::dto::*;
use super::error::{AppError, ValidationError, ValidationIssue};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/times/:station_id", get(departures))
        .route("/stations", get(search_stations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Real-time departures for a site.
async fn departures(
    State(state): State<AppState>,
    station_id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let Path(station_id) = station_id.map_err(|rejection| {
        ValidationError::from(ValidationIssue::invalid(
            "params",
            "stationId",
            rejection.body_text(),
        ))
    })?;
    let site_id = parse_station_id(&station_id)?;

    let results = state.sl.get_departures(&site_id).await?;

    Ok(Json(DeparturesResponse {
        station_id: site_id,
        results,
    }))
}

/// Station lookup by name, served from cache when possible.
async fn search_stations(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<StationsResponse>, AppError> {
    let Query(params) = params.map_err(|rejection| {
        ValidationError::from(ValidationIssue::invalid("query", "q", rejection.body_text()))
    })?;
    let query = single_param(params, "query", "q")?;

    let stations = state.sl.search_stations(&query).await?;

    Ok(Json(StationsResponse {
        query,
        results: stations.as_ref().clone(),
    }))
}

fn parse_station_id(raw: &str) -> Result<SiteId, ValidationError> {
    SiteId::parse(raw).map_err(|e| {
        ValidationError::from(ValidationIssue::invalid(
            "params",
            "stationId",
            format!("{}, got {raw:?}", e.reason()),
        ))
    })
}

/// The one value of `name` among `params`; absent or repeated is rejected.
fn single_param(
    params: Vec<(String, String)>,
    location: &str,
    name: &str,
) -> Result<String, ValidationError> {
    let mut values = params
        .into_iter()
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value);

    match (values.next(), values.next()) {
        (Some(value), None) => Ok(value),
        (None, _) => Err(ValidationIssue::required(location, name).into()),
        (Some(_), Some(_)) => {
            Err(ValidationIssue::invalid(location, name, "expected a single value").into())
        }
    }
}
