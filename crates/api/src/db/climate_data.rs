use async_trait::async_trait;
use climate_core::{format_date, parse_date, DateError};
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{future::Future, path::Path, time::Duration};
use time::Date;

use super::{PrecipitationReading, Station, TemperatureReading, TemperatureSummary};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Query did not finish within {0:?}")]
    Timeout(Duration),
    #[error("Dataset has no observations")]
    EmptyDataset,
    #[error("Dataset file not found: {0}")]
    MissingDataset(String),
    #[error("Invalid observation date: {0}")]
    Date(#[from] DateError),
}

#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Most recent observation date anywhere in the dataset
    async fn latest_date(&self) -> Result<Date, Error>;
    /// Precipitation readings on or after `start`, oldest first
    async fn precipitation_since(&self, start: Date) -> Result<Vec<PrecipitationReading>, Error>;
    /// All stations ordered by id
    async fn stations(&self) -> Result<Vec<Station>, Error>;
    /// Station with the most observation rows, ties broken by the smallest id
    async fn most_active_station(&self) -> Result<String, Error>;
    async fn temperature_observations(
        &self,
        station_id: String,
        start: Date,
    ) -> Result<Vec<TemperatureReading>, Error>;
    /// Min, average (one decimal) and max temperature over `start..=end`,
    /// or everything from `start` onwards when `end` is None
    async fn temperature_summary(
        &self,
        start: Date,
        end: Option<Date>,
    ) -> Result<TemperatureSummary, Error>;
    async fn health_check(&self) -> Result<(), Error>;
}

pub struct ClimateAccess {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl ClimateAccess {
    /// Opens the dataset read-only; it is never created or migrated here.
    pub async fn new(db_path: &str, query_timeout: Duration) -> Result<Self, Error> {
        if !Path::new(db_path).exists() {
            return Err(Error::MissingDataset(db_path.to_owned()));
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .read_only(true)
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(query_timeout)
            .connect_with(options)
            .await?;

        info!("SQLite dataset opened read-only at: {}", db_path);
        Ok(Self::from_pool(pool, query_timeout))
    }

    pub fn from_pool(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn timed<T, F>(&self, query: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.query_timeout, query)
            .await
            .map_err(|_| Error::Timeout(self.query_timeout))?
            .map_err(Error::from)
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn latest_date(&self) -> Result<Date, Error> {
        let latest: Option<String> = self
            .timed(sqlx::query_scalar("SELECT MAX(date) FROM measurement").fetch_one(&self.pool))
            .await?;
        let latest = latest.ok_or(Error::EmptyDataset)?;
        debug!("latest observation date: {}", latest);
        Ok(parse_date(&latest)?)
    }

    async fn precipitation_since(&self, start: Date) -> Result<Vec<PrecipitationReading>, Error> {
        self.timed(
            sqlx::query_as::<_, PrecipitationReading>(
                "SELECT date, CAST(prcp AS REAL) AS prcp
                 FROM measurement
                 WHERE date >= ?
                 ORDER BY date, station",
            )
            .bind(format_date(start))
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn stations(&self) -> Result<Vec<Station>, Error> {
        self.timed(
            sqlx::query_as::<_, Station>(
                "SELECT station, name,
                        CAST(latitude AS REAL) AS latitude,
                        CAST(longitude AS REAL) AS longitude,
                        CAST(elevation AS REAL) AS elevation
                 FROM station
                 ORDER BY station",
            )
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn most_active_station(&self) -> Result<String, Error> {
        let row: Option<(String, i64)> = self
            .timed(
                sqlx::query_as(
                    "SELECT station, COUNT(*) AS observations
                     FROM measurement
                     GROUP BY station
                     ORDER BY observations DESC, station ASC
                     LIMIT 1",
                )
                .fetch_optional(&self.pool),
            )
            .await?;
        let (station, observations) = row.ok_or(Error::EmptyDataset)?;
        debug!(
            "most active station: {} ({} observations)",
            station, observations
        );
        Ok(station)
    }

    async fn temperature_observations(
        &self,
        station_id: String,
        start: Date,
    ) -> Result<Vec<TemperatureReading>, Error> {
        self.timed(
            sqlx::query_as::<_, TemperatureReading>(
                "SELECT date, CAST(tobs AS REAL) AS tobs
                 FROM measurement
                 WHERE station = ? AND date >= ?
                 ORDER BY date",
            )
            .bind(station_id)
            .bind(format_date(start))
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn temperature_summary(
        &self,
        start: Date,
        end: Option<Date>,
    ) -> Result<TemperatureSummary, Error> {
        let query = match end {
            Some(end) => sqlx::query_as::<_, TemperatureSummary>(
                "SELECT CAST(MIN(tobs) AS REAL) AS tmin,
                        ROUND(AVG(tobs), 1) AS tavg,
                        CAST(MAX(tobs) AS REAL) AS tmax
                 FROM measurement
                 WHERE date >= ? AND date <= ?",
            )
            .bind(format_date(start))
            .bind(format_date(end)),
            None => sqlx::query_as::<_, TemperatureSummary>(
                "SELECT CAST(MIN(tobs) AS REAL) AS tmin,
                        ROUND(AVG(tobs), 1) AS tavg,
                        CAST(MAX(tobs) AS REAL) AS tmax
                 FROM measurement
                 WHERE date >= ?",
            )
            .bind(format_date(start)),
        };
        self.timed(query.fetch_one(&self.pool)).await
    }

    async fn health_check(&self) -> Result<(), Error> {
        self.timed(sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }
}
