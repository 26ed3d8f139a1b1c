//! Input validation run before any upstream request is made

use crate::{Result, WeatherError};

pub const MIN_CITY_NAME_LEN: usize = 2;
pub const MAX_CITY_NAME_LEN: usize = 100;

/// Check that a city name is usable as a geocoding query.
///
/// Surrounding whitespace is ignored; length is counted in characters.
pub fn validate_city_name(name: &str) -> Result<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(WeatherError::invalid_input("City name is required"));
    }

    let len = name.chars().count();
    if len < MIN_CITY_NAME_LEN {
        return Err(WeatherError::invalid_input(
            "City name must be at least 2 characters",
        ));
    }

    if len > MAX_CITY_NAME_LEN {
        return Err(WeatherError::invalid_input("City name is too long"));
    }

    Ok(())
}

/// Outcome of reading one coordinate from loosely typed input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateReading {
    Missing,
    Malformed,
    Degrees(f64),
}

/// A value that can carry a coordinate in decimal degrees.
///
/// Implemented for numbers and for text, since query strings arrive as
/// text.
pub trait CoordinateValue {
    fn read_degrees(&self) -> CoordinateReading;
}

impl CoordinateValue for f64 {
    fn read_degrees(&self) -> CoordinateReading {
        CoordinateReading::Degrees(*self)
    }
}

impl CoordinateValue for str {
    fn read_degrees(&self) -> CoordinateReading {
        let text = self.trim();
        if text.is_empty() {
            return CoordinateReading::Missing;
        }
        text.parse::<f64>()
            .map_or(CoordinateReading::Malformed, CoordinateReading::Degrees)
    }
}

impl CoordinateValue for String {
    fn read_degrees(&self) -> CoordinateReading {
        self.as_str().read_degrees()
    }
}

impl<T: CoordinateValue + ?Sized> CoordinateValue for &T {
    fn read_degrees(&self) -> CoordinateReading {
        (**self).read_degrees()
    }
}

impl<T: CoordinateValue> CoordinateValue for Option<T> {
    fn read_degrees(&self) -> CoordinateReading {
        self.as_ref()
            .map_or(CoordinateReading::Missing, |value| value.read_degrees())
    }
}

/// Validate a latitude/longitude pair and return it parsed.
///
/// Fails when either value is missing, not a number, or outside
/// `[-90, 90]` / `[-180, 180]`. Non-finite numbers are out of range.
pub fn validate_coordinates<L, O>(latitude: L, longitude: O) -> Result<(f64, f64)>
where
    L: CoordinateValue,
    O: CoordinateValue,
{
    let (lat, lon) = match (latitude.read_degrees(), longitude.read_degrees()) {
        (CoordinateReading::Missing, _) | (_, CoordinateReading::Missing) => {
            return Err(WeatherError::invalid_input(
                "Latitude and longitude are required",
            ));
        }
        (CoordinateReading::Degrees(lat), CoordinateReading::Degrees(lon)) => (lat, lon),
        _ => {
            return Err(WeatherError::invalid_input(
                "Invalid coordinate format. Must be numeric values",
            ));
        }
    };

    if !(-90.0..=90.0).contains(&lat) {
        return Err(WeatherError::invalid_input(
            "Latitude must be between -90 and 90",
        ));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(WeatherError::invalid_input(
            "Longitude must be between -180 and 180",
        ));
    }

    Ok((lat, lon))
}
