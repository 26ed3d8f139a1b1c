use async_trait::async_trait;

use crate::Result;
use crate::models::{AirQualitySnapshot, ForecastBundle, Location};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Provider of geocoding, forecast and air-quality data.
///
/// Each call is one upstream request. Implementations hold no state
/// between calls beyond their configuration.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Best match for a city name
    async fn geocode(&self, city_name: &str) -> Result<Location>;

    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<ForecastBundle>;

    /// Most recent hourly air-quality sample
    async fn fetch_air_quality(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<AirQualitySnapshot>;
}
