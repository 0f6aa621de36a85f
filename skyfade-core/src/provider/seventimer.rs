use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{FetchError, Service},
    model::{CloudForecast, Coordinate},
};

use super::{
    CloudForecastProvider, fetch_body, fixed_decimals, lenient_i64, parse_body, trim_base_url,
};

pub const DEFAULT_BASE_URL: &str = "https://www.7timer.info";

/// Client for the 7Timer! astro product.
#[derive(Debug, Clone)]
pub struct SevenTimerProvider {
    base_url: String,
    http: Client,
}

impl SevenTimerProvider {
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

impl Default for SevenTimerProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct StResponse {
    #[serde(default)]
    dataseries: Value,
}

#[derive(Debug, Default, Deserialize)]
struct StSlot {
    #[serde(default, deserialize_with = "lenient_i64")]
    cloudcover: Option<i64>,
}

#[async_trait]
impl CloudForecastProvider for SevenTimerProvider {
    async fn cloud_forecast(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Option<CloudForecast>, FetchError> {
        let url = format!("{}/bin/api.pl", self.base_url);
        tracing::debug!(%coordinate, %url, "requesting cloud forecast");

        let request = self.http.get(&url).query(&[
            ("lon", fixed_decimals(coordinate.longitude, 2)),
            ("lat", fixed_decimals(coordinate.latitude, 2)),
            ("product", "astro".to_string()),
            ("output", "json".to_string()),
        ]);

        let body = fetch_body(request, Service::CloudForecast).await?;
        let parsed: StResponse = parse_body(&body, Service::CloudForecast)?;

        let forecast = first_slot(&parsed.dataseries);
        if forecast.is_none() {
            tracing::debug!(%coordinate, "cloud forecast series was empty or missing");
        }

        Ok(forecast)
    }
}

/// Forecast from the first slot of the series.
///
/// A missing or non-array series gives `None`; a first slot that is not an
/// object gives a forecast with an unknown code.
fn first_slot(dataseries: &Value) -> Option<CloudForecast> {
    let first = dataseries.as_array()?.first()?;
    let slot: StSlot = serde_json::from_value(first.clone()).unwrap_or_default();

    Some(CloudForecast {
        cloud_cover_code: slot.cloudcover,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_slot_wins_and_odd_codes_survive_parsing() {
        let parsed: StResponse = serde_json::from_str(
            r#"{"product":"astro","dataseries":[{"cloudcover":"4"},{"cloudcover":9}]}"#,
        )
        .unwrap();

        assert_eq!(
            first_slot(&parsed.dataseries),
            Some(CloudForecast {
                cloud_cover_code: Some(4),
            })
        );
    }

    #[test]
    fn missing_or_null_series_has_no_forecast() {
        let parsed: StResponse = serde_json::from_str(r#"{"product":"astro"}"#).unwrap();
        assert_eq!(first_slot(&parsed.dataseries), None);

        assert_eq!(first_slot(&json!(null)), None);
        assert_eq!(first_slot(&json!("n/a")), None);
        assert_eq!(first_slot(&json!([])), None);
    }

    #[test]
    fn non_object_slot_gives_unknown_code() {
        let unknown = Some(CloudForecast {
            cloud_cover_code: None,
        });

        assert_eq!(first_slot(&json!([null])), unknown);
        assert_eq!(first_slot(&json!([1, {"cloudcover": 3}])), unknown);
        assert_eq!(first_slot(&json!([{"seeing": 2}])), unknown);
    }
}
