use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt::Debug;

use crate::{
    Config,
    error::{FetchError, Service},
    heuristic::estimate_azimuth,
    model::{CloudForecast, Coordinate, SunData, SunReport, SunsetRecord},
    provider::{seventimer::SevenTimerProvider, sunrise_sunset::SunriseSunsetProvider},
};

pub mod seventimer;
pub mod sunrise_sunset;

/// Source of sunrise/sunset times for today.
#[async_trait]
pub trait SunTimesProvider: Send + Sync + Debug {
    async fn sun_times(&self, coordinate: &Coordinate) -> Result<SunsetRecord, FetchError>;
}

/// Source of the cloud cover forecast. `Ok(None)` means the forecast was empty.
#[async_trait]
pub trait CloudForecastProvider: Send + Sync + Debug {
    async fn cloud_forecast(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Option<CloudForecast>, FetchError>;
}

/// Issues both lookups for a coordinate and joins the results.
#[derive(Debug)]
pub struct SunFetcher {
    sun_times: Box<dyn SunTimesProvider>,
    clouds: Box<dyn CloudForecastProvider>,
}

impl SunFetcher {
    pub fn new(
        sun_times: Box<dyn SunTimesProvider>,
        clouds: Box<dyn CloudForecastProvider>,
    ) -> Self {
        Self { sun_times, clouds }
    }

    /// Build the default HTTP providers using the configured endpoints.
    pub fn from_config(config: &Config) -> Self {
        let endpoints = &config.endpoints;
        let sun_times = SunriseSunsetProvider::with_base_url(&endpoints.sun_times);
        let clouds = SevenTimerProvider::with_base_url(&endpoints.cloud_forecast);

        Self::new(Box::new(sun_times), Box::new(clouds))
    }

    /// Run both requests concurrently. A failure of either one fails the whole lookup.
    pub async fn fetch(&self, coordinate: &Coordinate) -> Result<SunData, FetchError> {
        let (sun, cloud) = tokio::join!(
            self.sun_times.sun_times(coordinate),
            self.clouds.cloud_forecast(coordinate),
        );

        Ok(SunData {
            sun: sun?,
            cloud: cloud?,
        })
    }

    /// Fetch and combine with the direction estimate for `month0`.
    pub async fn report(
        &self,
        coordinate: Coordinate,
        month0: u32,
    ) -> Result<SunReport, FetchError> {
        let azimuth = estimate_azimuth(coordinate.latitude, month0);
        let data = self.fetch(&coordinate).await?;
        Ok(SunReport::new(coordinate, azimuth, data))
    }
}

/// Send a request and return the body of a 2xx response.
async fn fetch_body(request: RequestBuilder, service: Service) -> Result<String, FetchError> {
    let res = request.send().await.map_err(|source| {
        tracing::warn!(%service, error = %source, "request failed");
        FetchError::Transport { service, source }
    })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| FetchError::Transport { service, source })?;

    if !status.is_success() {
        tracing::warn!(%service, %status, "non-success response");
        return Err(FetchError::Status {
            service,
            status,
            body: truncate_body(&body),
        });
    }

    tracing::trace!(%service, body = %truncate_body(&body), "response body");
    Ok(body)
}

fn parse_body<'a, T: Deserialize<'a>>(body: &'a str, service: Service) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|source| {
        tracing::warn!(%service, error = %source, "unparseable response");
        FetchError::Parse { service, source }
    })
}

/// Fixed-point rendering for query strings. Ties round away from zero.
fn fixed_decimals(value: f64, decimals: u32) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value.abs() * factor).round() / factor;
    let sign = if value < 0.0 { "-" } else { "" };

    format!("{sign}{rounded:.prec$}", prec = decimals as usize)
}

fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Accepts a string; anything else becomes `None`.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Accepts a number or a numeric string; anything else becomes `None`.
fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts an integer or an integral string; anything else becomes `None`.
fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
