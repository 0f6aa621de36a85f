//! Core library for the `skyfade` CLI.
//!
//! This crate defines:
//! - The sunset direction heuristic
//! - Clients for the sun times and cloud forecast services
//! - Formatting of a lookup into display strings
//! - Per-selection view state with stale-result dropping
//! - Configuration handling and map tile addressing
//!
//! It is used by `skyfade-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod heuristic;
pub mod model;
pub mod present;
pub mod provider;
pub mod session;
pub mod tiles;

pub use config::{Config, Endpoints};
pub use error::{CoordinateError, FailureKind, FetchError};
pub use model::{CloudForecast, Coordinate, SunData, SunReport, SunsetRecord};
pub use present::Summary;
pub use provider::{CloudForecastProvider, SunFetcher, SunTimesProvider};
pub use session::{Session, Ticket, ViewState};
pub use tiles::{TileId, TileSource};
