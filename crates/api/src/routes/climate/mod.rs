pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use precipitation::precipitation;
pub use stations::stations;
pub use temperature::{temperature_from, temperature_range, INVALID_DATE_MESSAGE};
pub use tobs::tobs;

use axum::http::StatusCode;
use log::error;

use crate::db;

/// Storage failures are logged in full but only a generic message reaches the client.
pub(crate) fn storage_error(err: db::Error) -> (StatusCode, String) {
    error!("error querying climate data: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to query climate data".to_owned(),
    )
}
