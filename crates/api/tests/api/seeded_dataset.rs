use crate::helpers::{get, spawn_seeded_app, Measurement};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::collections::BTreeSet;

const STATIONS: [&str; 3] = ["USC00519397", "USC00513117", "USC00519281"];

const WINDOW_START: &str = "2016-08-23";

// USC00519281 has the most rows; the latest date is 2017-08-23
const MEASUREMENTS: [Measurement; 9] = [
    ("USC00513117", "2015-01-01", Some(0.2), 66.0),
    ("USC00519281", "2016-08-20", Some(0.1), 80.0),
    ("USC00519281", "2016-08-23", Some(1.79), 77.0),
    ("USC00519397", "2016-08-23", None, 81.0),
    ("USC00519281", "2017-02-01", Some(0.0), 60.0),
    ("USC00513117", "2017-05-05", Some(0.3), 71.0),
    ("USC00519397", "2017-08-22", Some(0.0), 82.0),
    ("USC00519281", "2017-08-23", Some(0.45), 76.0),
    ("USC00519281", "2016-08-22", Some(0.0), 79.0),
];

fn json_array(body: &str) -> Vec<Value> {
    match serde_json::from_str(body).unwrap() {
        Value::Array(values) => values,
        other => panic!("expected a JSON array, got {other}"),
    }
}

#[tokio::test]
async fn precipitation_is_chronological_within_window() {
    let app = spawn_seeded_app(&STATIONS, &MEASUREMENTS).await;

    let (status, body) = get(&app, "/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);

    let readings = json_array(&body);
    let dates: Vec<&str> = readings
        .iter()
        .map(|r| r["date"].as_str().unwrap())
        .collect();

    let expected = MEASUREMENTS
        .iter()
        .filter(|(_, date, _, _)| *date >= WINDOW_START)
        .count();
    assert_eq!(readings.len(), expected);
    assert!(dates.iter().all(|date| *date >= WINDOW_START));
    assert!(dates.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(readings.iter().any(|r| r["prcp"].is_null()));
}

#[tokio::test]
async fn stations_match_station_table() {
    let app = spawn_seeded_app(&STATIONS, &MEASUREMENTS).await;

    let (status, body) = get(&app, "/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);

    let ids = json_array(&body);
    assert_eq!(ids.len(), STATIONS.len());
    let ids: BTreeSet<&str> = ids.iter().map(|id| id.as_str().unwrap()).collect();
    assert_eq!(ids, STATIONS.into_iter().collect::<BTreeSet<_>>());
}

#[tokio::test]
async fn tobs_belongs_to_most_active_station() {
    let app = spawn_seeded_app(&STATIONS, &MEASUREMENTS).await;

    let (status, body) = get(&app, "/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        json!([
            {"date": "2016-08-23", "tobs": 77.0},
            {"date": "2017-02-01", "tobs": 60.0},
            {"date": "2017-08-23", "tobs": 76.0}
        ])
    );
}

#[tokio::test]
async fn start_summary_aggregates_later_rows() {
    let app = spawn_seeded_app(&STATIONS, &MEASUREMENTS).await;

    let (status, body) = get(&app, "/api/v1.0/2017-05-05").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!([{"tmin": 71.0, "tavg": 76.3, "tmax": 82.0}]));
}

#[tokio::test]
async fn reversed_range_yields_null_aggregates() {
    let app = spawn_seeded_app(&STATIONS, &MEASUREMENTS).await;

    let (status, body) = get(&app, "/api/v1.0/2017-08-23/2016-08-23").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!([{"tmin": null, "tavg": null, "tmax": null}]));
}

#[tokio::test]
async fn repeated_requests_are_byte_identical() {
    let app = spawn_seeded_app(&STATIONS, &MEASUREMENTS).await;

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2016-08-23",
        "/api/v1.0/2016-08-23/2017-02-01",
    ] {
        let (_, first) = get(&app, uri).await;
        let (_, second) = get(&app, uri).await;
        assert_eq!(first, second, "{uri}");
    }
}

#[tokio::test]
async fn malformed_stored_date_fails_without_detail() {
    let mut measurements = MEASUREMENTS.to_vec();
    measurements.push(("USC00519397", "2017/08/24", Some(0.0), 81.0));
    let app = spawn_seeded_app(&STATIONS, &measurements).await;

    let (status, body) = get(&app, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to query climate data");
}
