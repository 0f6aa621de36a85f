use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoordinateError;

/// A point selected on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Validate and build a coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse `"lat,lng"` or `"lat lng"`.
    pub fn parse(input: &str) -> Result<Self, CoordinateError> {
        let mut parts = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());

        let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CoordinateError::Format(input.trim().to_string()));
        };

        let latitude = lat
            .parse::<f64>()
            .map_err(|_| CoordinateError::Format(input.trim().to_string()))?;
        let longitude = lng
            .parse::<f64>()
            .map_err(|_| CoordinateError::Format(input.trim().to_string()))?;

        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}°, {:.4}°", self.latitude, self.longitude)
    }
}

/// Sunrise/sunset times as reported by the sun times service.
///
/// Values are kept verbatim; formatting happens in [`crate::present`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SunsetRecord {
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub day_length_seconds: Option<f64>,
}

/// Cloud cover for the first slot of the astronomical forecast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudForecast {
    /// 1 (clear) ..= 9 (overcast); anything else is treated as unknown.
    pub cloud_cover_code: Option<i64>,
}

/// Normalized result of both remote lookups for one coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SunData {
    pub sun: SunsetRecord,
    /// `None` when the forecast series was empty.
    pub cloud: Option<CloudForecast>,
}

/// Everything needed to render one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunReport {
    pub coordinate: Coordinate,
    pub azimuth: f64,
    pub sun: SunsetRecord,
    pub cloud: Option<CloudForecast>,
}

impl SunReport {
    pub fn new(coordinate: Coordinate, azimuth: f64, data: SunData) -> Self {
        Self {
            coordinate,
            azimuth,
            sun: data.sun,
            cloud: data.cloud,
        }
    }

    /// Cloud coverage percentage, if a forecast was available.
    pub fn cloudiness(&self) -> Option<u8> {
        self.cloud.map(|c| crate::present::cloud_cover_percent(c.cloud_cover_code))
    }
}
