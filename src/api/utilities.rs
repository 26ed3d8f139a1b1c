//! Routes exposing the validation and formatting helpers

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::presentation::TemperatureUnit;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/temperature/format", get(format_temperature))
        .route("/temperature/convert/to-fahrenheit", get(to_fahrenheit))
        .route("/temperature/convert/to-celsius", get(to_celsius))
        .route("/wind/direction", get(wind_direction))
        .route("/aqi/categorize", get(categorize_aqi))
        .route("/validate/city", get(validate_city))
        .route("/validate/coordinates", get(validate_coordinates))
}

#[derive(Deserialize)]
struct FormatQuery {
    celsius: f64,
    unit: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct FormattedTemperature {
    pub input: f64,
    pub unit: String,
    pub formatted: String,
}

#[derive(Deserialize)]
struct CelsiusQuery {
    celsius: f64,
}

#[derive(Deserialize)]
struct FahrenheitQuery {
    fahrenheit: f64,
}

#[derive(Serialize, Deserialize)]
pub struct TemperatureConversion {
    pub celsius: f64,
    pub fahrenheit: f64,
}

#[derive(Deserialize)]
struct DegreesQuery {
    degrees: f64,
}

#[derive(Serialize, Deserialize)]
pub struct WindDirection {
    pub degrees: f64,
    pub direction: String,
}

#[derive(Deserialize)]
struct AqiQuery {
    index: Option<i64>,
}

#[derive(Serialize, Deserialize)]
pub struct AqiCategory {
    pub index: Option<i64>,
    pub category: String,
    pub recommendation: String,
    pub color: String,
}

#[derive(Deserialize)]
struct NameQuery {
    name: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CityValidation {
    pub valid: bool,
    pub error: Option<String>,
    pub input: String,
}

#[derive(Deserialize)]
struct CoordinatesQuery {
    lat: Option<String>,
    lon: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CoordinatesValidation {
    pub valid: bool,
    pub error: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

async fn format_temperature(
    State(state): State<AppState>,
    query: Result<Query<FormatQuery>, QueryRejection>,
) -> Result<Json<FormattedTemperature>, ApiError> {
    let Query(query) = query?;
    let unit = match query.unit.as_deref() {
        Some(unit) => unit.parse::<TemperatureUnit>()?,
        None => TemperatureUnit::default(),
    };

    Ok(Json(FormattedTemperature {
        input: query.celsius,
        unit: unit.to_string(),
        formatted: state.utilities.format_temperature(query.celsius, unit),
    }))
}

async fn to_fahrenheit(
    State(state): State<AppState>,
    query: Result<Query<CelsiusQuery>, QueryRejection>,
) -> Result<Json<TemperatureConversion>, ApiError> {
    let Query(query) = query?;
    Ok(Json(TemperatureConversion {
        celsius: query.celsius,
        fahrenheit: state.utilities.celsius_to_fahrenheit(query.celsius),
    }))
}

async fn to_celsius(
    State(state): State<AppState>,
    query: Result<Query<FahrenheitQuery>, QueryRejection>,
) -> Result<Json<TemperatureConversion>, ApiError> {
    let Query(query) = query?;
    Ok(Json(TemperatureConversion {
        celsius: state.utilities.fahrenheit_to_celsius(query.fahrenheit),
        fahrenheit: query.fahrenheit,
    }))
}

async fn wind_direction(
    State(state): State<AppState>,
    query: Result<Query<DegreesQuery>, QueryRejection>,
) -> Result<Json<WindDirection>, ApiError> {
    let Query(query) = query?;
    Ok(Json(WindDirection {
        degrees: query.degrees,
        direction: state.utilities.wind_direction(query.degrees).to_string(),
    }))
}

async fn categorize_aqi(
    State(state): State<AppState>,
    query: Result<Query<AqiQuery>, QueryRejection>,
) -> Result<Json<AqiCategory>, ApiError> {
    let Query(AqiQuery { index }) = query?;
    Ok(Json(AqiCategory {
        index,
        category: state.utilities.categorize_aqi(index).to_string(),
        recommendation: state.utilities.aqi_recommendation(index).to_string(),
        color: state.utilities.aqi_color(index).to_string(),
    }))
}

async fn validate_city(
    State(state): State<AppState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<CityValidation>, ApiError> {
    let Query(query) = query?;
    let input = query.name.unwrap_or_default();
    let error = state
        .utilities
        .validate_city_name(&input)
        .err()
        .map(|e| e.to_string());

    Ok(Json(CityValidation {
        valid: error.is_none(),
        error,
        input,
    }))
}

async fn validate_coordinates(
    State(state): State<AppState>,
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> Result<Json<CoordinatesValidation>, ApiError> {
    let Query(query) = query?;
    let result = state.utilities.validate_coordinates(
        query.lat.as_deref().unwrap_or_default(),
        query.lon.as_deref().unwrap_or_default(),
    );

    Ok(Json(match result {
        Ok((latitude, longitude)) => CoordinatesValidation {
            valid: true,
            error: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
        },
        Err(e) => CoordinatesValidation {
            valid: false,
            error: Some(e.to_string()),
            latitude: None,
            longitude: None,
        },
    }))
}
