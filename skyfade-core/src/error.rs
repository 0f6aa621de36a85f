//! Error types for coordinate handling and the remote lookups.
//!
//! Every [`FetchError`] collapses to the same user-facing message; the
//! variants only exist so logs and tests can tell failures apart.

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Message shown for any failed lookup.
pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch data. Please try again.";

#[derive(Debug, Error)]
pub enum CoordinateError {
    #[error("Latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("Longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    #[error("Could not read a coordinate from '{0}'. Expected 'lat,lng'.")]
    Format(String),
}

/// Which remote service a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    SunTimes,
    CloudForecast,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Service::SunTimes => "sunrise-sunset",
            Service::CloudForecast => "7timer",
        })
    }
}

/// Coarse failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Data,
    Parse,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to reach {service}: {source}")]
    Transport {
        service: Service,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: Service,
        status: StatusCode,
        body: String,
    },

    #[error("sunrise-sunset reported status '{0}'")]
    Data(String),

    #[error("Failed to parse {service} response: {source}")]
    Parse {
        service: Service,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Transport { .. } | FetchError::Status { .. } => FailureKind::Network,
            FetchError::Data(_) => FailureKind::Data,
            FetchError::Parse { .. } => FailureKind::Parse,
        }
    }

    pub fn service(&self) -> Service {
        match self {
            FetchError::Transport { service, .. }
            | FetchError::Status { service, .. }
            | FetchError::Parse { service, .. } => *service,
            FetchError::Data(_) => Service::SunTimes,
        }
    }

    /// Message suitable for display. Identical for all variants.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FETCH_ERROR
    }
}
