//! Weather aggregation service
//!
//! Sequences geocode → forecast → air quality for a city name and decides
//! which failures abort the report.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::WeatherError;
use crate::models::{LocationSummary, WeatherReport};
use crate::validation::validate_city_name;
use crate::weather::WeatherSource;

/// Step of the aggregation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStage {
    Validation,
    Geocoding,
    Forecast,
}

impl fmt::Display for ReportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportStage::Validation => "validation",
            ReportStage::Geocoding => "geocoding",
            ReportStage::Forecast => "forecast",
        })
    }
}

/// A fatal aggregation failure, carrying the underlying error unchanged
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{source}")]
pub struct ReportError {
    pub stage: ReportStage,
    pub source: WeatherError,
}

impl ReportError {
    fn at(stage: ReportStage) -> impl FnOnce(WeatherError) -> Self {
        move |source| Self { stage, source }
    }
}

/// Builds combined weather reports on top of a [`WeatherSource`]
#[derive(Clone)]
pub struct WeatherService {
    source: Arc<dyn WeatherSource>,
}

impl WeatherService {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self { source }
    }

    /// Location, forecast and air quality for a city.
    ///
    /// Calls are made one after another. Validation, geocoding and
    /// forecast failures are fatal; an air-quality failure only leaves
    /// `air_quality` empty.
    #[instrument(skip(self))]
    pub async fn get_complete_weather(
        &self,
        city_name: &str,
    ) -> Result<WeatherReport, ReportError> {
        validate_city_name(city_name).map_err(ReportError::at(ReportStage::Validation))?;

        let location = self
            .source
            .geocode(city_name.trim())
            .await
            .map_err(ReportError::at(ReportStage::Geocoding))?;

        let timezone = location.forecast_timezone();
        debug!(
            "Fetching forecast for {} ({}) in timezone {}",
            location.name,
            location.format_coordinates(),
            timezone
        );

        let forecast = self
            .source
            .fetch_forecast(location.latitude, location.longitude, timezone)
            .await
            .map_err(ReportError::at(ReportStage::Forecast))?;

        let air_quality = match self
            .source
            .fetch_air_quality(location.latitude, location.longitude, timezone)
            .await
        {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Air quality unavailable for {}: {}", location.name, e);
                None
            }
        };

        info!(
            "Built weather report for {} (air quality: {})",
            location.name,
            if air_quality.is_some() { "yes" } else { "no" }
        );

        Ok(WeatherReport {
            location: LocationSummary::from(&location),
            forecast,
            air_quality,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use crate::models::{AirQualitySnapshot, CurrentConditions, ForecastBundle, Location};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// In-memory source returning canned results and recording calls
    struct StubSource {
        geocode: Result<Location>,
        forecast: Result<ForecastBundle>,
        air_quality: Result<AirQualitySnapshot>,
        calls: Mutex<Vec<String>>,
    }

    impl StubSource {
        fn healthy() -> Self {
            Self {
                geocode: Ok(location()),
                forecast: Ok(forecast()),
                air_quality: Ok(air_quality()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherSource for StubSource {
        async fn geocode(&self, city_name: &str) -> Result<Location> {
            self.calls.lock().unwrap().push(format!("geocode:{city_name}"));
            self.geocode.clone()
        }

        async fn fetch_forecast(
            &self,
            _latitude: f64,
            _longitude: f64,
            timezone: &str,
        ) -> Result<ForecastBundle> {
            self.calls.lock().unwrap().push(format!("forecast:{timezone}"));
            self.forecast.clone()
        }

        async fn fetch_air_quality(
            &self,
            _latitude: f64,
            _longitude: f64,
            timezone: &str,
        ) -> Result<AirQualitySnapshot> {
            self.calls.lock().unwrap().push(format!("air_quality:{timezone}"));
            self.air_quality.clone()
        }
    }

    fn location() -> Location {
        Location {
            name: "London".to_string(),
            country: Some("United Kingdom".to_string()),
            admin1: Some("England".to_string()),
            latitude: 51.508_53,
            longitude: -0.125_74,
            timezone: Some("Europe/London".to_string()),
            population: Some(7_556_900),
        }
    }

    fn forecast() -> ForecastBundle {
        ForecastBundle {
            latitude: 51.5,
            longitude: -0.12,
            timezone: Some("Europe/London".to_string()),
            timezone_abbreviation: Some("BST".to_string()),
            utc_offset_seconds: Some(3600),
            elevation: Some(23.0),
            current: CurrentConditions {
                time: "2024-06-01T12:00".to_string(),
                temperature: Some(16.2),
                humidity: Some(60.0),
                apparent_temperature: Some(15.1),
                weather_code: Some(3),
                description: "Overcast".to_string(),
                wind_speed: Some(12.5),
                wind_direction: Some(250.0),
                precipitation: Some(0.0),
                pressure_msl: Some(1015.2),
                surface_pressure: Some(1012.4),
                visibility: Some(24_140.0),
                uv_index: Some(3.2),
                is_day: true,
            },
            hourly: Vec::new(),
            daily: Vec::new(),
            retrieved_at: Utc::now(),
        }
    }

    fn air_quality() -> AirQualitySnapshot {
        AirQualitySnapshot {
            index: Some(32),
            pm25: Some(4),
            pm10: Some(9),
            no2: Some(14),
            timestamp: "2024-06-01T12:00".to_string(),
        }
    }

    fn service(source: &Arc<StubSource>) -> WeatherService {
        WeatherService::new(source.clone())
    }

    #[tokio::test]
    async fn test_complete_weather_success() {
        let source = Arc::new(StubSource::healthy());

        let report = service(&source)
            .get_complete_weather("  London ")
            .await
            .unwrap();

        assert_eq!(report.location.name, "London");
        assert_eq!(report.location.timezone, "Europe/London");
        assert_eq!(report.forecast.current.temperature, Some(16.2));
        assert_eq!(report.air_quality.unwrap().index, Some(32));
        assert_eq!(
            source.calls(),
            vec![
                "geocode:London",
                "forecast:Europe/London",
                "air_quality:Europe/London"
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_name_makes_no_calls() {
        let source = Arc::new(StubSource::healthy());

        let err = service(&source).get_complete_weather(" x ").await.unwrap_err();

        assert_eq!(err.stage, ReportStage::Validation);
        assert!(matches!(err.source, WeatherError::InvalidInput { .. }));
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_geocoding_failure_is_propagated_verbatim() {
        let source = Arc::new(StubSource {
            geocode: Err(WeatherError::not_found("City not found")),
            ..StubSource::healthy()
        });

        let err = service(&source)
            .get_complete_weather("Atlantis")
            .await
            .unwrap_err();

        assert_eq!(err.stage, ReportStage::Geocoding);
        assert_eq!(err.source, WeatherError::not_found("City not found"));
        assert_eq!(err.to_string(), "City not found");
        assert_eq!(source.calls(), vec!["geocode:Atlantis"]);
    }

    #[tokio::test]
    async fn test_forecast_failure_is_fatal() {
        let source = Arc::new(StubSource {
            forecast: Err(WeatherError::timeout()),
            ..StubSource::healthy()
        });

        let err = service(&source)
            .get_complete_weather("London")
            .await
            .unwrap_err();

        assert_eq!(err.stage, ReportStage::Forecast);
        assert_eq!(err.source, WeatherError::timeout());
        assert!(!source.calls().iter().any(|c| c.starts_with("air_quality")));
    }

    #[tokio::test]
    async fn test_air_quality_failure_is_tolerated() {
        let source = Arc::new(StubSource {
            air_quality: Err(WeatherError::upstream("Air quality service unavailable")),
            ..StubSource::healthy()
        });

        let report = service(&source)
            .get_complete_weather("London")
            .await
            .unwrap();

        assert!(report.air_quality.is_none());
        assert_eq!(report.forecast, forecast_without_timestamp(&report.forecast));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["air_quality"].is_null());
    }

    #[tokio::test]
    async fn test_missing_timezone_falls_back_to_auto() {
        let source = Arc::new(StubSource {
            geocode: Ok(Location {
                timezone: None,
                ..location()
            }),
            ..StubSource::healthy()
        });

        let report = service(&source)
            .get_complete_weather("London")
            .await
            .unwrap();

        assert_eq!(report.location.timezone, "auto");
        assert!(source.calls().contains(&"forecast:auto".to_string()));
    }

    /// The stub's bundle with the report's retrieval time, for equality checks
    fn forecast_without_timestamp(actual: &ForecastBundle) -> ForecastBundle {
        ForecastBundle {
            retrieved_at: actual.retrieved_at,
            ..forecast()
        }
    }
}
