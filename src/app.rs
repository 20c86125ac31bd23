use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/readings", get(handlers::get_readings))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/status", get(handlers::get_status))
        .with_state(state)
}
