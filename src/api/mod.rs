pub mod adjustments;
pub mod cascade;
pub mod health;
pub mod segments;

use crate::orchestration::Simulator;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

/// Shared state. A single lock serializes every edit and read, so each
/// recomputation runs to completion before the next request sees the views.
#[derive(Clone)]
pub struct AppState {
    pub simulator: Arc<Mutex<Simulator>>,
}

impl AppState {
    pub fn new(simulator: Simulator) -> Self {
        Self {
            simulator: Arc::new(Mutex::new(simulator)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/segments", get(segments::list_segments))
        .route(
            "/v1/segments/:segment/products",
            get(segments::get_products),
        )
        .route("/v1/cascade/:scope", get(cascade::get_cascade))
        .route(
            "/v1/adjustments",
            get(adjustments::list_adjustments)
                .post(adjustments::set_adjustment)
                .delete(adjustments::clear_adjustments),
        )
        .layer(cors)
        .with_state(state)
}
