use crate::{
    db::{self, ClimateAccess, ClimateData},
    health, index_handler, precipitation, routes, stations, temperature_from, temperature_range,
    tobs,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::{sync::Arc, time::Duration};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
    /// Length of the trailing window used by the precipitation and tobs routes
    pub window_days: u32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::precipitation::precipitation,
        routes::climate::stations::stations,
        routes::climate::tobs::tobs,
        routes::climate::temperature::temperature_from,
        routes::climate::temperature::temperature_range,
        routes::home::health::health,
    ),
    components(
        schemas(
                db::PrecipitationReading,
                db::TemperatureReading,
                db::TemperatureSummary,
        )
    ),
    tags(
        (name = "climate history api", description = "a read-only api over historical precipitation and temperature observations")
    )
)]
struct ApiDoc;

/// Opens the dataset and makes sure it has observations to compute windows from.
pub async fn build_app_state(
    database: String,
    window_days: u32,
    query_timeout: Duration,
) -> Result<AppState, anyhow::Error> {
    let climate_db = ClimateAccess::new(&database, query_timeout)
        .await
        .map_err(|e| anyhow!("error opening climate dataset: {}", e))?;

    let latest = climate_db
        .latest_date()
        .await
        .map_err(|e| anyhow!("error reading latest observation date: {}", e))?;
    info!("dataset observations run through {}", latest);

    Ok(AppState {
        climate_db: Arc::new(climate_db),
        window_days,
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_from))
        .route("/api/v1.0/{start}/{end}", get(temperature_range))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
