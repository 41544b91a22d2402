use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::storage_error;
use crate::{
    db::{trailing_window_start, PrecipitationReading},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation for the trailing window before the latest observation, oldest first", body = Vec<PrecipitationReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationReading>>, (StatusCode, String)> {
    let start = trailing_window_start(state.climate_db.as_ref(), state.window_days)
        .await
        .map_err(storage_error)?;

    let readings = state
        .climate_db
        .precipitation_since(start)
        .await
        .map_err(storage_error)?;

    Ok(Json(readings))
}
