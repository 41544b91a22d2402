pub mod climate_data;

pub use climate_data::*;

use climate_core::window_start;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use utoipa::ToSchema;

/// Row of the `station` table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Station {
    #[sqlx(rename = "station")]
    pub station_id: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct PrecipitationReading {
    /// Observation date, `YYYY-MM-DD`
    pub date: String,
    /// Precipitation amount, null when not recorded
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct TemperatureReading {
    /// Observation date, `YYYY-MM-DD`
    pub date: String,
    /// Observed temperature
    pub tobs: Option<f64>,
}

/// Aggregate temperatures; every field is null when no observation matched
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct TemperatureSummary {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

/// Start of the trailing window: `days` before the latest observation date.
pub async fn trailing_window_start(db: &dyn ClimateData, days: u32) -> Result<Date, Error> {
    let latest = db.latest_date().await?;
    Ok(window_start(latest, days)?)
}
