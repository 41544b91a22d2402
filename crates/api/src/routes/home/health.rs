use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use log::error;

use crate::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Dataset is reachable", body = String),
        (status = SERVICE_UNAVAILABLE, description = "Dataset could not be queried")
    ))]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match state.climate_db.health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            error!("health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}
