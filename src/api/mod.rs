use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
    routing::get,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WeatherHubConfig;
use crate::models::{AirQualitySnapshot, ForecastBundle, Location, WeatherReport};
use crate::service::WeatherService;
use crate::utilities::{NativeUtilities, WeatherUtilities};
use crate::weather::{OpenMeteoClient, WeatherSource};

mod error;
mod utilities;

pub use error::{ApiError, INTERNAL_ERROR_MESSAGE};

const SERVICE_NAME: &str = "Weather API";

/// Shared handles passed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn WeatherSource>,
    pub weather: WeatherService,
    pub utilities: Arc<dyn WeatherUtilities>,
}

impl AppState {
    pub fn new(source: Arc<dyn WeatherSource>, utilities: Arc<dyn WeatherUtilities>) -> Self {
        Self {
            weather: WeatherService::new(source.clone()),
            source,
            utilities,
        }
    }

    /// State backed by the Open-Meteo client described in `config`
    pub fn from_config(config: &WeatherHubConfig) -> crate::Result<Self> {
        let client = OpenMeteoClient::new(&config.upstream)?;
        Ok(Self::new(Arc::new(client), Arc::new(NativeUtilities)))
    }
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

#[derive(Deserialize)]
struct NameQuery {
    name: Option<String>,
}

#[derive(Deserialize)]
struct CityQuery {
    city: Option<String>,
}

#[derive(Deserialize)]
struct CoordinatesQuery {
    lat: Option<String>,
    lon: Option<String>,
    timezone: Option<String>,
}

impl CoordinatesQuery {
    fn timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or("auto")
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/geocode", get(geocode))
        .route("/forecast", get(forecast))
        .route("/air-quality", get(air_quality))
        .route("/weather", get(complete_weather))
        .merge(utilities::routes())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        service: SERVICE_NAME.to_string(),
    })
}

async fn geocode(
    State(state): State<AppState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<Location>, ApiError> {
    let Query(query) = query?;
    let name = query.name.unwrap_or_default();
    state.utilities.validate_city_name(&name)?;

    let location = state.source.geocode(name.trim()).await?;
    Ok(Json(location))
}

async fn forecast(
    State(state): State<AppState>,
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> Result<Json<ForecastBundle>, ApiError> {
    let Query(query) = query?;
    let (latitude, longitude) = state.utilities.validate_coordinates(
        query.lat.as_deref().unwrap_or_default(),
        query.lon.as_deref().unwrap_or_default(),
    )?;
    debug!(latitude, longitude, timezone = query.timezone(), "Forecast requested");

    let bundle = state
        .source
        .fetch_forecast(latitude, longitude, query.timezone())
        .await?;
    Ok(Json(bundle))
}

async fn air_quality(
    State(state): State<AppState>,
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> Result<Json<AirQualitySnapshot>, ApiError> {
    let Query(query) = query?;
    let (latitude, longitude) = state.utilities.validate_coordinates(
        query.lat.as_deref().unwrap_or_default(),
        query.lon.as_deref().unwrap_or_default(),
    )?;
    debug!(latitude, longitude, timezone = query.timezone(), "Air quality requested");

    let snapshot = state
        .source
        .fetch_air_quality(latitude, longitude, query.timezone())
        .await?;
    Ok(Json(snapshot))
}

async fn complete_weather(
    State(state): State<AppState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Json<WeatherReport>, ApiError> {
    let Query(query) = query?;
    let city = query.city.unwrap_or_default();

    let report = state.weather.get_complete_weather(&city).await?;
    Ok(Json(report))
}
