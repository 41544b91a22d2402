use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use climate_core::{parse_date, DateError};
use log::info;
use std::sync::Arc;
use time::Date;

use super::storage_error;
use crate::{db::TemperatureSummary, AppState};

pub const INVALID_DATE_MESSAGE: &str =
    "Error: Invalid date format. Please use YYYY-MM-DD format when entering a query.";

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Min, average and max temperature from the start date onwards", body = Vec<TemperatureSummary>),
        (status = BAD_REQUEST, description = "Date is not in YYYY-MM-DD format", body = String),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureSummary>>, (StatusCode, String)> {
    let start = parse_date(&start).map_err(invalid_date)?;
    summarize(&state, start, None).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "First date to include, YYYY-MM-DD"),
         ("end" = String, Path, description = "Last date to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Min, average and max temperature between both dates, inclusive", body = Vec<TemperatureSummary>),
        (status = BAD_REQUEST, description = "A date is not in YYYY-MM-DD format", body = String),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn temperature_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureSummary>>, (StatusCode, String)> {
    let start = parse_date(&start).map_err(invalid_date)?;
    let end = parse_date(&end).map_err(invalid_date)?;
    summarize(&state, start, Some(end)).await
}

async fn summarize(
    state: &AppState,
    start: Date,
    end: Option<Date>,
) -> Result<Json<Vec<TemperatureSummary>>, (StatusCode, String)> {
    let summary = state
        .climate_db
        .temperature_summary(start, end)
        .await
        .map_err(storage_error)?;

    Ok(Json(vec![summary]))
}

fn invalid_date(err: DateError) -> (StatusCode, String) {
    info!("rejected temperature query: {}", err);
    (StatusCode::BAD_REQUEST, INVALID_DATE_MESSAGE.to_owned())
}
