//! Weather API client for Open-Meteo
//!
//! Wraps the geocoding, forecast and air-quality endpoints. Each operation
//! is a single GET with the configured timeout; failures are mapped onto
//! [`WeatherError`] kinds and never retried.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::WeatherSource;
use crate::config::UpstreamConfig;
use crate::models::forecast::{FORECAST_DAYS, PAST_HOURS};
use crate::models::{AirQualitySnapshot, ForecastBundle, Location};
use crate::validation::{validate_city_name, validate_coordinates};
use crate::{Result, WeatherError};

const USER_AGENT: &str = concat!("WeatherHub/", env!("CARGO_PKG_VERSION"));

const SLOW_RESPONSE: Duration = Duration::from_secs(5);

pub const CURRENT_VARIABLES: [&str; 12] = [
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "weather_code",
    "wind_speed_10m",
    "wind_direction_10m",
    "precipitation",
    "pressure_msl",
    "surface_pressure",
    "visibility",
    "uv_index",
    "is_day",
];

pub const HOURLY_VARIABLES: [&str; 6] = [
    "temperature_2m",
    "weather_code",
    "precipitation_probability",
    "precipitation",
    "visibility",
    "uv_index",
];

pub const DAILY_VARIABLES: [&str; 11] = [
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "precipitation_probability_max",
    "precipitation_hours",
    "sunrise",
    "sunset",
    "uv_index_max",
    "wind_speed_10m_max",
    "wind_direction_10m_dominant",
];

pub const AIR_QUALITY_VARIABLES: [&str; 4] =
    ["european_aqi", "pm10", "pm2_5", "nitrogen_dioxide"];

#[derive(Debug, Clone, Copy)]
enum Upstream {
    Geocoding,
    Forecast,
    AirQuality,
}

impl Upstream {
    fn label(self) -> &'static str {
        match self {
            Upstream::Geocoding => "Geocoding",
            Upstream::Forecast => "Forecast",
            Upstream::AirQuality => "Air quality",
        }
    }
}

/// Open-Meteo client
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
    air_quality_url: String,
}

impl OpenMeteoClient {
    /// Create a new client for the configured endpoints
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            air_quality_url: config.air_quality_url.clone(),
        })
    }

    /// Send one GET request and decode the JSON body
    #[instrument(level = "debug", skip_all, fields(upstream = upstream.label(), url = %url))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        upstream: Upstream,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        debug!("Upstream request parameters: {:?}", params);
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| request_error(upstream, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} upstream returned HTTP {}", upstream.label(), status);
            return Err(WeatherError::upstream(format!(
                "{} service unavailable: HTTP {}",
                upstream.label(),
                status.as_u16()
            )));
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|e| request_error(upstream, &e))?;

        let total_duration = start_time.elapsed();
        if total_duration > SLOW_RESPONSE {
            warn!(
                "Slow {} response: {:.3}s",
                upstream.label(),
                total_duration.as_secs_f64()
            );
        } else {
            info!(
                "{} request succeeded in {:.3}s",
                upstream.label(),
                total_duration.as_secs_f64()
            );
        }

        Ok(body)
    }
}

fn request_error(upstream: Upstream, err: &reqwest::Error) -> WeatherError {
    if err.is_timeout() {
        warn!("{} request timed out: {}", upstream.label(), err);
        WeatherError::timeout()
    } else {
        warn!("{} request failed: {}", upstream.label(), err);
        WeatherError::upstream(format!("{} service unavailable", upstream.label()))
    }
}

fn timezone_param(timezone: &str) -> String {
    let timezone = timezone.trim();
    if timezone.is_empty() {
        "auto".to_string()
    } else {
        timezone.to_string()
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn geocode(&self, city_name: &str) -> Result<Location> {
        validate_city_name(city_name)?;
        let name = city_name.trim();
        info!("Geocoding city '{}'", name);

        let params = [
            ("name", name.to_string()),
            ("count", "1".to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];

        let response: wire::GeocodingResponse = self
            .get_json(Upstream::Geocoding, &self.geocoding_url, &params)
            .await?;

        // upstream orders by relevance; the first entry is the best match
        let Some(best) = response.results.unwrap_or_default().into_iter().next() else {
            warn!("No geocoding results for '{}'", name);
            return Err(WeatherError::not_found("City not found"));
        };

        let location = Location::from(best);
        debug!(
            "Resolved '{}' to {} ({})",
            name,
            location.name,
            location.format_coordinates()
        );
        Ok(location)
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<ForecastBundle> {
        let (latitude, longitude) = validate_coordinates(latitude, longitude)?;
        info!(
            "Getting {}-day forecast for coordinates: {:.4}, {:.4}",
            FORECAST_DAYS, latitude, longitude
        );

        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("timezone", timezone_param(timezone)),
            ("current", CURRENT_VARIABLES.join(",")),
            ("hourly", HOURLY_VARIABLES.join(",")),
            ("daily", DAILY_VARIABLES.join(",")),
            ("forecast_days", FORECAST_DAYS.to_string()),
            ("past_hours", PAST_HOURS.to_string()),
        ];

        let response: wire::ForecastResponse = self
            .get_json(Upstream::Forecast, &self.forecast_url, &params)
            .await?;

        let bundle = response.into_bundle()?;
        debug!(
            "Forecast has {} hourly and {} daily entries",
            bundle.hourly.len(),
            bundle.daily.len()
        );
        Ok(bundle)
    }

    #[instrument(skip(self))]
    async fn fetch_air_quality(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<AirQualitySnapshot> {
        let (latitude, longitude) = validate_coordinates(latitude, longitude)?;
        info!(
            "Getting air quality for coordinates: {:.4}, {:.4}",
            latitude, longitude
        );

        let params = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("timezone", timezone_param(timezone)),
            ("hourly", AIR_QUALITY_VARIABLES.join(",")),
        ];

        let response: wire::AirQualityResponse = self
            .get_json(Upstream::AirQuality, &self.air_quality_url, &params)
            .await?;

        response.hourly.unwrap_or_default().latest().ok_or_else(|| {
            warn!("Air quality series is empty");
            WeatherError::not_found("No air quality data available for this location")
        })
    }
}

/// Open-Meteo response structures and conversion into the public models
mod wire {
    use chrono::Utc;
    use serde::Deserialize;

    use crate::models::{
        AirQualitySnapshot, CurrentConditions, DailySummary, ForecastBundle, HourlySample,
        Location,
    };
    use crate::presentation::weather_code_description;
    use crate::{Result, WeatherError};

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
        pub admin1: Option<String>,
        pub timezone: Option<String>,
        pub population: Option<u64>,
    }

    impl From<GeocodingResult> for Location {
        fn from(result: GeocodingResult) -> Self {
            Location {
                name: result.name,
                country: result.country,
                admin1: result.admin1,
                latitude: result.latitude,
                longitude: result.longitude,
                timezone: result.timezone,
                population: result.population,
            }
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub latitude: f64,
        pub longitude: f64,
        pub timezone: Option<String>,
        pub timezone_abbreviation: Option<String>,
        pub utc_offset_seconds: Option<i32>,
        pub elevation: Option<f64>,
        pub current: Option<CurrentData>,
        pub hourly: Option<HourlyData>,
        pub daily: Option<DailyData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        pub time: String,
        pub temperature_2m: Option<f64>,
        pub relative_humidity_2m: Option<f64>,
        pub apparent_temperature: Option<f64>,
        pub weather_code: Option<u8>,
        pub wind_speed_10m: Option<f64>,
        pub wind_direction_10m: Option<f64>,
        pub precipitation: Option<f64>,
        pub pressure_msl: Option<f64>,
        pub surface_pressure: Option<f64>,
        pub visibility: Option<f64>,
        pub uv_index: Option<f64>,
        pub is_day: Option<u8>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct HourlyData {
        pub time: Vec<String>,
        pub temperature_2m: Vec<Option<f64>>,
        pub weather_code: Vec<Option<u8>>,
        pub precipitation_probability: Vec<Option<f64>>,
        pub precipitation: Vec<Option<f64>>,
        pub visibility: Vec<Option<f64>>,
        pub uv_index: Vec<Option<f64>>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct DailyData {
        pub time: Vec<String>,
        pub weather_code: Vec<Option<u8>>,
        pub temperature_2m_max: Vec<Option<f64>>,
        pub temperature_2m_min: Vec<Option<f64>>,
        pub precipitation_sum: Vec<Option<f64>>,
        pub precipitation_probability_max: Vec<Option<f64>>,
        pub precipitation_hours: Vec<Option<f64>>,
        pub sunrise: Vec<Option<String>>,
        pub sunset: Vec<Option<String>>,
        pub uv_index_max: Vec<Option<f64>>,
        pub wind_speed_10m_max: Vec<Option<f64>>,
        pub wind_direction_10m_dominant: Vec<Option<f64>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AirQualityResponse {
        pub hourly: Option<AirQualityHourly>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct AirQualityHourly {
        pub time: Vec<String>,
        pub european_aqi: Vec<Option<f64>>,
        pub pm10: Vec<Option<f64>>,
        pub pm2_5: Vec<Option<f64>>,
        pub nitrogen_dioxide: Vec<Option<f64>>,
    }

    /// Value at `index`; a short series or a null entry both read as `None`
    fn at<T: Copy>(series: &[Option<T>], index: usize) -> Option<T> {
        series.get(index).copied().flatten()
    }

    fn text_at(series: &[Option<String>], index: usize) -> Option<String> {
        series.get(index).cloned().flatten()
    }

    fn describe(code: Option<u8>) -> String {
        code.map_or("Unknown", weather_code_description).to_string()
    }

    /// Round half to even, matching the upstream's own rounding convention
    fn rounded(series: &[Option<f64>], index: usize) -> Option<i64> {
        at(series, index)
            .filter(|value| value.is_finite())
            .map(|value| value.round_ties_even() as i64)
    }

    impl ForecastResponse {
        pub fn into_bundle(self) -> Result<ForecastBundle> {
            let current = self.current.ok_or_else(|| {
                WeatherError::upstream("Forecast service returned no current conditions")
            })?;

            Ok(ForecastBundle {
                latitude: self.latitude,
                longitude: self.longitude,
                timezone: self.timezone,
                timezone_abbreviation: self.timezone_abbreviation,
                utc_offset_seconds: self.utc_offset_seconds,
                elevation: self.elevation,
                current: current.into(),
                hourly: self.hourly.map(|h| h.samples()).unwrap_or_default(),
                daily: self.daily.map(|d| d.summaries()).unwrap_or_default(),
                retrieved_at: Utc::now(),
            })
        }
    }

    impl From<CurrentData> for CurrentConditions {
        fn from(current: CurrentData) -> Self {
            CurrentConditions {
                time: current.time,
                temperature: current.temperature_2m,
                humidity: current.relative_humidity_2m,
                apparent_temperature: current.apparent_temperature,
                weather_code: current.weather_code,
                description: describe(current.weather_code),
                wind_speed: current.wind_speed_10m,
                wind_direction: current.wind_direction_10m,
                precipitation: current.precipitation,
                pressure_msl: current.pressure_msl,
                surface_pressure: current.surface_pressure,
                visibility: current.visibility,
                uv_index: current.uv_index,
                is_day: current.is_day == Some(1),
            }
        }
    }

    impl HourlyData {
        fn samples(&self) -> Vec<HourlySample> {
            self.time
                .iter()
                .enumerate()
                .map(|(i, time)| HourlySample {
                    time: time.clone(),
                    temperature: at(&self.temperature_2m, i),
                    weather_code: at(&self.weather_code, i),
                    precipitation_probability: at(&self.precipitation_probability, i),
                    precipitation: at(&self.precipitation, i),
                    visibility: at(&self.visibility, i),
                    uv_index: at(&self.uv_index, i),
                })
                .collect()
        }
    }

    impl DailyData {
        fn summaries(&self) -> Vec<DailySummary> {
            self.time
                .iter()
                .enumerate()
                .map(|(i, date)| {
                    let weather_code = at(&self.weather_code, i);
                    DailySummary {
                        date: date.clone(),
                        weather_code,
                        description: describe(weather_code),
                        temperature_max: at(&self.temperature_2m_max, i),
                        temperature_min: at(&self.temperature_2m_min, i),
                        precipitation_sum: at(&self.precipitation_sum, i),
                        precipitation_probability_max: at(&self.precipitation_probability_max, i),
                        precipitation_hours: at(&self.precipitation_hours, i),
                        sunrise: text_at(&self.sunrise, i),
                        sunset: text_at(&self.sunset, i),
                        uv_index_max: at(&self.uv_index_max, i),
                        wind_speed_max: at(&self.wind_speed_10m_max, i),
                        wind_direction_dominant: at(&self.wind_direction_10m_dominant, i),
                    }
                })
                .collect()
        }
    }

    impl AirQualityHourly {
        /// Snapshot of the last sample in the series, `None` when empty
        pub fn latest(&self) -> Option<AirQualitySnapshot> {
            let timestamp = self.time.last()?.clone();
            let index = self.time.len() - 1;

            Some(AirQualitySnapshot {
                index: rounded(&self.european_aqi, index),
                pm25: rounded(&self.pm2_5, index),
                pm10: rounded(&self.pm10, index),
                no2: rounded(&self.nitrogen_dioxide, index),
                timestamp,
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde_json::json;

        #[test]
        fn test_forecast_columns_become_rows() {
            let response: ForecastResponse = serde_json::from_value(json!({
                "latitude": 51.5,
                "longitude": -0.12,
                "timezone": "Europe/London",
                "timezone_abbreviation": "BST",
                "utc_offset_seconds": 3600,
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
                    "weather_code": [2, null],
                    "precipitation_probability": [5],
                    "precipitation": [0.0, 0.1],
                    "visibility": [24000.0, 23000.0],
                    "uv_index": [2.9, 3.2]
                },
                "daily": {
                    "time": ["2024-06-01"],
                    "weather_code": [61],
                    "temperature_2m_max": [18.4],
                    "temperature_2m_min": [9.7],
                    "precipitation_sum": [1.2],
                    "precipitation_probability_max": [40],
                    "precipitation_hours": [2.0],
                    "sunrise": ["2024-06-01T04:46"],
                    "sunset": [null],
                    "uv_index_max": [5.9],
                    "wind_speed_10m_max": [21.4],
                    "wind_direction_10m_dominant": [238]
                }
            }))
            .unwrap();

            let bundle = response.into_bundle().unwrap();

            assert_eq!(bundle.current.description, "Overcast");
            assert!(bundle.current.is_day);
            assert_eq!(bundle.current.humidity, Some(60.0));

            assert_eq!(bundle.hourly.len(), 2);
            assert_eq!(bundle.hourly[0].weather_code, Some(2));
            assert_eq!(bundle.hourly[1].weather_code, None);
            // shorter series than the time axis
            assert_eq!(bundle.hourly[0].precipitation_probability, Some(5.0));
            assert_eq!(bundle.hourly[1].precipitation_probability, None);

            assert_eq!(bundle.daily.len(), 1);
            assert_eq!(bundle.daily[0].description, "Rain");
            assert_eq!(bundle.daily[0].sunrise.as_deref(), Some("2024-06-01T04:46"));
            assert_eq!(bundle.daily[0].sunset, None);
            assert_eq!(bundle.daily[0].wind_direction_dominant, Some(238.0));
        }

        #[test]
        fn test_forecast_without_current_is_rejected() {
            let response: ForecastResponse = serde_json::from_value(json!({
                "latitude": 51.5,
                "longitude": -0.12,
                "hourly": { "time": [] }
            }))
            .unwrap();

            let err = response.into_bundle().unwrap_err();
            assert!(matches!(err, WeatherError::UpstreamUnavailable { .. }));
        }

        #[test]
        fn test_air_quality_takes_last_sample() {
            let hourly: AirQualityHourly = serde_json::from_value(json!({
                "time": ["2024-06-01T10:00", "2024-06-01T11:00", "2024-06-01T12:00"],
                "european_aqi": [10, 20, 32.5],
                "pm10": [5.0, 6.0, null],
                "pm2_5": [3.2, 3.4, 3.6],
                "nitrogen_dioxide": [12.0, 14.0]
            }))
            .unwrap();

            let snapshot = hourly.latest().unwrap();
            assert_eq!(snapshot.timestamp, "2024-06-01T12:00");
            assert_eq!(snapshot.index, Some(32));
            assert_eq!(snapshot.pm25, Some(4));
            assert_eq!(snapshot.pm10, None);
            assert_eq!(snapshot.no2, None);
        }

        #[test]
        fn test_air_quality_empty_series() {
            assert!(AirQualityHourly::default().latest().is_none());
        }

        #[test]
        fn test_rounding_is_half_to_even() {
            let series = [Some(2.5), Some(3.5), Some(-0.4)];
            assert_eq!(rounded(&series, 0), Some(2));
            assert_eq!(rounded(&series, 1), Some(4));
            assert_eq!(rounded(&series, 2), Some(0));
            assert_eq!(rounded(&series, 3), None);
        }
    }
}
