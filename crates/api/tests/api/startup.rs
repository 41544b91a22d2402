use climate_api::{build_app_state, ClimateData};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Writes a dataset file with the station/measurement schema and the given
/// observation dates, returning its path.
async fn dataset_file(file_name: &str, dates: &[&str]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("climate-api-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(file_name);
    let _ = fs::remove_file(&path);

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::query(
        "CREATE TABLE station (
            id INTEGER PRIMARY KEY, station TEXT, name TEXT,
            latitude FLOAT, longitude FLOAT, elevation FLOAT)",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY, station TEXT, date TEXT,
            prcp FLOAT, tobs FLOAT)",
    )
    .execute(&pool)
    .await
    .unwrap();

    for date in dates {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES ('USC00519281', ?, 0.0, 75.0)")
            .bind(*date)
            .execute(&pool)
            .await
            .unwrap();
    }

    pool.close().await;
    path
}

fn path_str(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

#[tokio::test]
async fn startup_refuses_empty_dataset() {
    let path = dataset_file("empty.sqlite", &[]).await;

    let result = build_app_state(path_str(&path), 365, Duration::from_secs(5)).await;

    assert!(result.is_err());
    fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn startup_refuses_missing_dataset() {
    let result = build_app_state(
        "/nonexistent/climate-api/hawaii.sqlite".to_string(),
        365,
        Duration::from_secs(5),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn startup_opens_dataset_with_url_characters_in_path() {
    let path = dataset_file("hawaii#v1?mode=memory.sqlite", &["2017-08-23"]).await;

    let state = build_app_state(path_str(&path), 365, Duration::from_secs(5))
        .await
        .expect("dataset path should be used as a plain filename");

    assert_eq!(state.window_days, 365);
    let latest = state.climate_db.latest_date().await.unwrap();
    assert_eq!(latest, time::macros::date!(2017 - 08 - 23));
    fs::remove_file(&path).unwrap();
}
