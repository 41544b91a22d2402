use axum::{extract::State, http::StatusCode, Json};
use log::info;
use std::sync::Arc;

use super::storage_error;
use crate::{
    db::{trailing_window_start, TemperatureReading},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations of the most active station for the trailing window, oldest first", body = Vec<TemperatureReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureReading>>, (StatusCode, String)> {
    let station_id = state
        .climate_db
        .most_active_station()
        .await
        .map_err(storage_error)?;

    let start = trailing_window_start(state.climate_db.as_ref(), state.window_days)
        .await
        .map_err(storage_error)?;
    info!("temperature observations for {} since {}", station_id, start);

    let readings = state
        .climate_db
        .temperature_observations(station_id, start)
        .await
        .map_err(storage_error)?;

    Ok(Json(readings))
}
