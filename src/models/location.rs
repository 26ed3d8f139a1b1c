//! Location model produced by geocoding

use serde::{Deserialize, Serialize};

/// Best geocoding match for a city name
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Place name as returned by the geocoder
    pub name: String,
    /// Country name
    pub country: Option<String>,
    /// First-level administrative region (state, province)
    pub admin1: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// IANA timezone name, e.g. `Europe/London`
    pub timezone: Option<String>,
    pub population: Option<u64>,
}

impl Location {
    /// Timezone to request forecasts in; `auto` lets the upstream decide
    #[must_use]
    pub fn forecast_timezone(&self) -> &str {
        self.timezone
            .as_deref()
            .filter(|tz| !tz.is_empty())
            .unwrap_or("auto")
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> Location {
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

    #[test]
    fn test_forecast_timezone() {
        let mut location = london();
        assert_eq!(location.forecast_timezone(), "Europe/London");

        location.timezone = None;
        assert_eq!(location.forecast_timezone(), "auto");

        location.timezone = Some(String::new());
        assert_eq!(location.forecast_timezone(), "auto");
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(london().format_coordinates(), "51.5085, -0.1257");
    }
}
