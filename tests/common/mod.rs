//! Shared fixtures for tests that talk to a mocked Open-Meteo

#![allow(dead_code)]

use serde_json::{Value, json};
use weatherhub::config::UpstreamConfig;
use weatherhub::{WeatherHubConfig, config::ServerConfig};
use wiremock::MockServer;

pub const GEOCODING_PATH: &str = "/v1/search";
pub const FORECAST_PATH: &str = "/v1/forecast";
pub const AIR_QUALITY_PATH: &str = "/v1/air-quality";

/// Upstream settings pointing every endpoint at the mock server
pub fn upstream_config(server: &MockServer, timeout_seconds: u64) -> UpstreamConfig {
    UpstreamConfig {
        geocoding_url: format!("{}{GEOCODING_PATH}", server.uri()),
        forecast_url: format!("{}{FORECAST_PATH}", server.uri()),
        air_quality_url: format!("{}{AIR_QUALITY_PATH}", server.uri()),
        timeout_seconds,
    }
}

pub fn app_config(server: &MockServer) -> WeatherHubConfig {
    WeatherHubConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            static_dir: None,
        },
        upstream: upstream_config(server, 5),
        ..WeatherHubConfig::default()
    }
}

pub fn london_geocoding() -> Value {
    json!({
        "results": [{
            "id": 2_643_743,
            "name": "London",
            "latitude": 51.508_53,
            "longitude": -0.125_74,
            "elevation": 25.0,
            "country": "United Kingdom",
            "admin1": "England",
            "timezone": "Europe/London",
            "population": 7_556_900
        }],
        "generationtime_ms": 0.6
    })
}

pub fn empty_geocoding() -> Value {
    json!({ "generationtime_ms": 0.3 })
}

pub fn london_forecast() -> Value {
    json!({
        "latitude": 51.5,
        "longitude": -0.120_000_124,
        "generationtime_ms": 0.2,
        "utc_offset_seconds": 3600,
        "timezone": "Europe/London",
        "timezone_abbreviation": "BST",
        "elevation": 23.0,
        "current": {
            "time": "2024-06-01T12:00",
            "interval": 900,
            "temperature_2m": 16.2,
            "relative_humidity_2m": 60,
            "apparent_temperature": 15.1,
            "weather_code": 3,
            "wind_speed_10m": 12.5,
            "wind_direction_10m": 250,
            "precipitation": 0.0,
            "pressure_msl": 1015.2,
            "surface_pressure": 1012.4,
            "visibility": 24140.0,
            "uv_index": 3.2,
            "is_day": 1
        },
        "hourly": {
            "time": ["2024-06-01T11:00", "2024-06-01T12:00"],
            "temperature_2m": [15.8, 16.2],
            "weather_code": [2, 3],
            "precipitation_probability": [5, 10],
            "precipitation": [0.0, 0.0],
            "visibility": [24000.0, 24140.0],
            "uv_index": [2.9, 3.2]
        },
        "daily": {
            "time": ["2024-06-01", "2024-06-02"],
            "weather_code": [3, 61],
            "temperature_2m_max": [18.4, 17.0],
            "temperature_2m_min": [9.1, 10.2],
            "precipitation_sum": [0.0, 4.2],
            "precipitation_probability_max": [10, 80],
            "precipitation_hours": [0.0, 5.0],
            "sunrise": ["2024-06-01T04:47", "2024-06-02T04:46"],
            "sunset": ["2024-06-01T21:08", "2024-06-02T21:09"],
            "uv_index_max": [5.1, 3.0],
            "wind_speed_10m_max": [18.0, 25.3],
            "wind_direction_10m_dominant": [240, 210]
        }
    })
}

pub fn london_air_quality() -> Value {
    json!({
        "latitude": 51.5,
        "longitude": -0.12,
        "hourly": {
            "time": ["2024-06-01T10:00", "2024-06-01T11:00", "2024-06-01T12:00"],
            "european_aqi": [28, 30, 32.5],
            "pm10": [12.0, 11.2, 9.4],
            "pm2_5": [5.0, 4.1, 3.6],
            "nitrogen_dioxide": [20.1, 18.3, null]
        }
    })
}
