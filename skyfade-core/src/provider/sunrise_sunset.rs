use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{FetchError, Service},
    model::{Coordinate, SunsetRecord},
};

use super::{
    SunTimesProvider, fetch_body, fixed_decimals, lenient_f64, lenient_string, parse_body,
    trim_base_url,
};

pub const DEFAULT_BASE_URL: &str = "https://api.sunrise-sunset.org";

/// Client for api.sunrise-sunset.org.
#[derive(Debug, Clone)]
pub struct SunriseSunsetProvider {
    base_url: String,
    http: Client,
}

impl SunriseSunsetProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: trim_base_url(base_url),
            http: Client::new(),
        }
    }
}

impl Default for SunriseSunsetProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct SsResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    status: Option<String>,
    #[serde(default)]
    results: Value,
}

#[derive(Debug, Default, Deserialize)]
struct SsResults {
    #[serde(default, deserialize_with = "lenient_string")]
    sunrise: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    sunset: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    day_length: Option<f64>,
}

#[async_trait]
impl SunTimesProvider for SunriseSunsetProvider {
    async fn sun_times(&self, coordinate: &Coordinate) -> Result<SunsetRecord, FetchError> {
        let url = format!("{}/json", self.base_url);
        tracing::debug!(%coordinate, %url, "requesting sun times");

        let request = self.http.get(&url).query(&[
            ("lat", fixed_decimals(coordinate.latitude, 4)),
            ("lng", fixed_decimals(coordinate.longitude, 4)),
            ("date", "today".to_string()),
            ("formatted", "0".to_string()),
        ]);

        let body = fetch_body(request, Service::SunTimes).await?;
        let parsed: SsResponse = parse_body(&body, Service::SunTimes)?;

        match parsed.status.as_deref() {
            Some("OK") => {}
            other => {
                let status = other.unwrap_or("<missing>").to_string();
                tracing::warn!(%status, "sun times service rejected the request");
                return Err(FetchError::Data(status));
            }
        }

        // A malformed `results` object degrades to unknown fields.
        let results: SsResults = serde_json::from_value(parsed.results).unwrap_or_default();

        Ok(SunsetRecord {
            sunrise: results.sunrise,
            sunset: results.sunset,
            day_length_seconds: results.day_length,
        })
    }
}
