use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use laurio_agents::PipelineFactory;
use laurio_common::Config;

pub mod rest;

pub struct AppState {
    pub config: Config,
    /// Stages are built fresh for every request.
    pub pipelines: Arc<dyn PipelineFactory>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Pipeline runs
        .route("/run-flow", post(rest::run_flow))
        .route("/run-daily", post(rest::run_daily))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
