//! Air-quality snapshot model

use serde::{Deserialize, Serialize};

use crate::presentation::categorize_aqi;

/// Latest hourly air-quality sample for a location.
///
/// Values are rounded to whole numbers. A value the upstream did not
/// report stays `None` and serializes as `null`, never as zero.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AirQualitySnapshot {
    /// European AQI
    pub index: Option<i64>,
    /// PM2.5 in μg/m³
    pub pm25: Option<i64>,
    /// PM10 in μg/m³
    pub pm10: Option<i64>,
    /// Nitrogen dioxide in μg/m³
    pub no2: Option<i64>,
    /// Local timestamp of the sample, `YYYY-MM-DDTHH:MM`
    pub timestamp: String,
}

impl AirQualitySnapshot {
    #[must_use]
    pub fn category(&self) -> &'static str {
        categorize_aqi(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_serialize_as_null() {
        let snapshot = AirQualitySnapshot {
            index: None,
            pm25: Some(7),
            pm10: None,
            no2: Some(0),
            timestamp: "2024-06-01T12:00".to_string(),
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["index"].is_null());
        assert!(json["pm10"].is_null());
        assert_eq!(json["pm25"], 7);
        assert_eq!(json["no2"], 0);
        assert_eq!(snapshot.category(), "Unknown");
    }
}
