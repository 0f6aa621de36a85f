//! Rough sunset direction from latitude and season.
//!
//! This is not a solar position calculation. It starts from due west and
//! nudges the bearing by season and, at high latitudes, by how far the point
//! is from the 50th parallel.

use chrono::{Datelike, Local};

const BASE_AZIMUTH: f64 = 270.0;
const SEASONAL_SHIFT: f64 = 15.0;
const HIGH_LATITUDE: f64 = 50.0;
const MAX_HIGH_LATITUDE_SHIFT: f64 = 20.0;

/// April..=September (zero-based months). Applied to both hemispheres.
fn is_northern_summer(month0: u32) -> bool {
    (3..=8).contains(&month0)
}

/// Approximate sunset azimuth in degrees for a zero-based `month0`.
///
/// The result is not normalized to `[0, 360)`.
pub fn estimate_azimuth(latitude: f64, month0: u32) -> f64 {
    let summer = is_northern_summer(month0);
    let northern = latitude > 0.0;

    let mut azimuth = BASE_AZIMUTH;

    azimuth += match (northern, summer) {
        (true, true) | (false, false) => -SEASONAL_SHIFT,
        (true, false) | (false, true) => SEASONAL_SHIFT,
    };

    let abs_lat = latitude.abs();
    if abs_lat > HIGH_LATITUDE {
        let sign = if northern { -1.0 } else { 1.0 };
        azimuth += sign * ((abs_lat - HIGH_LATITUDE) / 2.0).min(MAX_HIGH_LATITUDE_SHIFT);
    }

    azimuth
}

/// [`estimate_azimuth`] for the current local month.
pub fn estimate_azimuth_now(latitude: f64) -> f64 {
    estimate_azimuth(latitude, current_month0())
}

/// Zero-based month of the local calendar.
pub fn current_month0() -> u32 {
    Local::now().month0()
}

/// Rotation for an arrow glyph so it points at the sun.
pub fn arrow_rotation(azimuth: f64) -> f64 {
    azimuth - 180.0
}
