//! Router construction.

use std::path::Path;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers;
use crate::AppState;

/// Build the full axum router. Files under `well_known_dir` are served at
/// `/.well-known`.
pub fn build_router(state: AppState, well_known_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/docs", get(handlers::docs))
        .route("/openapi.json", get(handlers::openapi))
        .route("/health", get(handlers::health))
        .route("/countries", get(handlers::countries))
        .route("/countries/:country", get(handlers::cities))
        .route("/countries/:country/:city", get(handlers::monthly_averages))
        .route(
            "/countries/:country/:city/:month",
            get(handlers::monthly_average),
        )
        .nest_service("/.well-known", ServeDir::new(well_known_dir))
        .fallback(handlers::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
