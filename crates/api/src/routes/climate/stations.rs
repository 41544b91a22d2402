use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::storage_error;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every station id in the dataset", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let stations = state.climate_db.stations().await.map_err(storage_error)?;

    Ok(Json(
        stations
            .into_iter()
            .map(|station| station.station_id)
            .collect(),
    ))
}
