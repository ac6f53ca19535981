//! Route handlers.
//!
//! GET /                                   → 301 to /docs
//! GET /docs                               → route overview
//! GET /openapi.json                       → OpenAPI document
//! GET /health                             → dataset summary
//! GET /countries[/{country}[/{city}[/{month}]]] → lookups
//! anything else with a trailing slash     → 307 to the trimmed path

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::SecondsFormat;
use climate_data::DatasetSummary;
use serde::Serialize;

use crate::openapi;
use crate::response::lookup_response;
use crate::segments::{lossy_segments, segment};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub summary: DatasetSummary,
    pub loaded_at: String,
}

pub async fn root() -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/docs")])
}

pub async fn docs() -> Html<String> {
    Html(openapi::docs_page())
}

pub async fn openapi() -> Json<serde_json::Value> {
    Json(openapi::document())
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        summary: state.lookup.summary(),
        loaded_at: state
            .lookup
            .loaded_at()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub async fn countries(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .lookup
            .list_countries()
            .into_iter()
            .map(str::to_owned)
            .collect(),
    )
}

// Lookup handlers read segments from the raw URI: `/countries/{country}/{city}/{month}`.

pub async fn cities(State(state): State<AppState>, uri: Uri) -> Response {
    let segments = lossy_segments(uri.path());
    lookup_response(state.lookup.list_cities(segment(&segments, 1)))
}

pub async fn monthly_averages(State(state): State<AppState>, uri: Uri) -> Response {
    let segments = lossy_segments(uri.path());
    lookup_response(
        state
            .lookup
            .city_monthly_averages(segment(&segments, 1), segment(&segments, 2)),
    )
}

pub async fn monthly_average(State(state): State<AppState>, uri: Uri) -> Response {
    let segments = lossy_segments(uri.path());
    lookup_response(state.lookup.monthly_average(
        segment(&segments, 1),
        segment(&segments, 2),
        segment(&segments, 3),
    ))
}

/// Unmatched routes. A trailing slash is redirected to the path without it;
/// everything else is a bare 404.
pub async fn fallback(uri: Uri) -> Response {
    let path = uri.path();
    let trimmed = path.trim_end_matches('/');
    // "//host" would be read as a network-path reference.
    if trimmed.len() == path.len() || trimmed.is_empty() || trimmed.starts_with("//") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let target = match uri.query() {
        Some(query) => format!("{trimmed}?{query}"),
        None => trimmed.to_string(),
    };
    Redirect::temporary(&target).into_response()
}
