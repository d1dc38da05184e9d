//! HTTP gateway (Axum) for the estimation pipeline.
//!
//! This module is primarily used by the `janlens` server binary.

pub mod error;
pub mod handler;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::estimate_jancode_handler;
pub use state::AppState;

use crate::lookup::ProductLookup;
use crate::vision::VisionModel;

/// Path of the estimation endpoint.
pub const ESTIMATE_PATH: &str = "/api/v1/estimate-jancode";

pub fn create_router_with_state<V, L>(state: AppState<V, L>) -> Router
where
    V: VisionModel + 'static,
    L: ProductLookup + 'static,
{
    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(health_handler))
        .route(ESTIMATE_PATH, post(estimate_jancode_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub api_prefix: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "JAN Code Estimation API",
        version: env!("CARGO_PKG_VERSION"),
        api_prefix: "/api/v1",
    })
}
