//! Display strings for a [`SunReport`].

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::fmt::Display;

use crate::{heuristic::arrow_rotation, model::SunReport};

/// Shown in place of a missing or unreadable value.
pub const UNKNOWN: &str = "Unknown";

/// Render an RFC 3339 timestamp as local `HH:MM`.
pub fn format_time(iso: Option<&str>) -> String {
    format_time_in(iso, &Local)
}

/// Render an RFC 3339 timestamp as `HH:MM` in `tz`.
pub fn format_time_in<Tz>(iso: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    iso.and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(tz).format("%H:%M").to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// `"<h>h <m>m <s>s"`, each unit floored.
pub fn format_day_length(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| s.is_finite()) else {
        return UNKNOWN.to_string();
    };

    let hours = (seconds / 3600.0).floor() as i64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as i64;
    let secs = (seconds % 60.0).floor() as i64;

    format!("{hours}h {minutes}m {secs}s")
}

/// Coarse compass word for a sunset azimuth, or `""` outside the known bands.
pub fn compass_label(azimuth: f64) -> &'static str {
    if azimuth > 265.0 && azimuth < 275.0 {
        "West"
    } else if (275.0..315.0).contains(&azimuth) {
        "Northwest"
    } else if (225.0..=265.0).contains(&azimuth) {
        "Southwest"
    } else {
        ""
    }
}

/// `"245° (Southwest)"`, or just `"200°"` when no label applies.
pub fn sun_position_label(azimuth: f64) -> String {
    let degrees = azimuth.round() as i64;
    match compass_label(azimuth) {
        "" => format!("{degrees}°"),
        label => format!("{degrees}° ({label})"),
    }
}

/// Percentage for a 7Timer cloud cover code.
pub fn cloud_cover_percent(code: Option<i64>) -> u8 {
    match code {
        Some(1) => 10,
        Some(2) => 25,
        Some(3) => 40,
        Some(4) => 50,
        Some(5) => 60,
        Some(6) => 75,
        Some(7) => 85,
        Some(8) => 95,
        Some(9) => 100,
        _ => 0,
    }
}

pub fn visibility_percent(cloudiness: u8) -> u8 {
    100u8.saturating_sub(cloudiness)
}

/// Qualitative sunset viewing forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
    Clear,
    Partial,
    MostlyCloudy,
}

impl Outlook {
    pub fn from_cloudiness(cloudiness: u8) -> Self {
        if cloudiness < 30 {
            Self::Clear
        } else if cloudiness < 70 {
            Self::Partial
        } else {
            Self::MostlyCloudy
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Clear => "Clear skies expected! Great conditions for viewing the sunset.",
            Self::Partial => {
                "Partially cloudy. You might get a beautiful sunset with cloud colors."
            }
            Self::MostlyCloudy => "Mostly cloudy. The sunset might not be clearly visible.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudSummary {
    pub coverage_pct: u8,
    pub visibility_pct: u8,
    pub outlook: Outlook,
    pub message: String,
}

impl CloudSummary {
    pub fn from_cloudiness(cloudiness: u8) -> Self {
        let outlook = Outlook::from_cloudiness(cloudiness);
        Self {
            coverage_pct: cloudiness,
            visibility_pct: visibility_percent(cloudiness),
            outlook,
            message: outlook.message().to_string(),
        }
    }
}

/// Formatted view of a [`SunReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub location: String,
    pub sunset: String,
    pub sunrise: String,
    pub day_length: String,
    pub azimuth: f64,
    pub sun_position: String,
    pub arrow_rotation: f64,
    pub cloud: Option<CloudSummary>,
}

impl Summary {
    pub fn from_report(report: &SunReport) -> Self {
        Self::from_report_in(report, &Local)
    }

    pub fn from_report_in<Tz>(report: &SunReport, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            location: report.coordinate.to_string(),
            sunset: format_time_in(report.sun.sunset.as_deref(), tz),
            sunrise: format_time_in(report.sun.sunrise.as_deref(), tz),
            day_length: format_day_length(report.sun.day_length_seconds),
            azimuth: report.azimuth,
            sun_position: sun_position_label(report.azimuth),
            arrow_rotation: arrow_rotation(report.azimuth),
            cloud: report.cloudiness().map(CloudSummary::from_cloudiness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CloudForecast, Coordinate, SunData, SunsetRecord};
    use chrono::{FixedOffset, Utc};

    #[test]
    fn day_length_formatting() {
        assert_eq!(format_day_length(Some(3661.0)), "1h 1m 1s");
        assert_eq!(format_day_length(Some(36000.0)), "10h 0m 0s");
        assert_eq!(format_day_length(Some(0.0)), "0h 0m 0s");
        assert_eq!(format_day_length(Some(43199.9)), "11h 59m 59s");
        assert_eq!(format_day_length(None), "Unknown");
        assert_eq!(format_day_length(Some(f64::NAN)), "Unknown");
    }

    #[test]
    fn time_formatting_in_zone() {
        let iso = Some("2024-01-01T17:00:00+00:00");
        assert_eq!(format_time_in(iso, &Utc), "17:00");

        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(format_time_in(iso, &est), "12:00");
    }

    #[test]
    fn time_placeholder_for_missing_or_bad_input() {
        assert_eq!(format_time_in(None, &Utc), UNKNOWN);
        assert_eq!(format_time_in(Some("not a time"), &Utc), UNKNOWN);
        assert_eq!(format_time(Some("")), UNKNOWN);
    }

    #[test]
    fn compass_bands() {
        assert_eq!(compass_label(270.0), "West");
        assert_eq!(compass_label(300.0), "Northwest");
        assert_eq!(compass_label(240.0), "Southwest");
        assert_eq!(compass_label(100.0), "");

        assert_eq!(compass_label(265.0), "Southwest");
        assert_eq!(compass_label(275.0), "Northwest");
        assert_eq!(compass_label(225.0), "Southwest");
        assert_eq!(compass_label(315.0), "");
        assert_eq!(compass_label(-90.0), "");
    }

    #[test]
    fn sun_position_rounds_and_labels() {
        assert_eq!(sun_position_label(245.0), "245° (Southwest)");
        assert_eq!(sun_position_label(269.6), "270° (West)");
        assert_eq!(sun_position_label(200.0), "200°");
    }

    #[test]
    fn cloud_code_table() {
        let expected = [10, 25, 40, 50, 60, 75, 85, 95, 100];
        for (code, pct) in (1..=9).zip(expected) {
            assert_eq!(cloud_cover_percent(Some(code)), pct);
        }
        assert_eq!(cloud_cover_percent(Some(0)), 0);
        assert_eq!(cloud_cover_percent(Some(10)), 0);
        assert_eq!(cloud_cover_percent(None), 0);
    }

    #[test]
    fn outlook_thresholds() {
        assert_eq!(Outlook::from_cloudiness(0), Outlook::Clear);
        assert_eq!(Outlook::from_cloudiness(29), Outlook::Clear);
        assert_eq!(Outlook::from_cloudiness(30), Outlook::Partial);
        assert_eq!(Outlook::from_cloudiness(69), Outlook::Partial);
        assert_eq!(Outlook::from_cloudiness(70), Outlook::MostlyCloudy);
        assert_eq!(Outlook::from_cloudiness(100), Outlook::MostlyCloudy);
    }

    #[test]
    fn summary_from_report() {
        let coordinate = Coordinate::new(40.7128, -74.006).unwrap();
        let data = SunData {
            sun: SunsetRecord {
                sunrise: Some("2024-01-01T07:00:00+00:00".into()),
                sunset: Some("2024-01-01T17:00:00+00:00".into()),
                day_length_seconds: Some(36000.0),
            },
            cloud: Some(CloudForecast {
                cloud_cover_code: Some(3),
            }),
        };
        let report = SunReport::new(coordinate, 285.0, data);

        let summary = Summary::from_report_in(&report, &Utc);

        assert_eq!(summary.location, "40.7128°, -74.0060°");
        assert_eq!(summary.sunrise, "07:00");
        assert_eq!(summary.sunset, "17:00");
        assert_eq!(summary.day_length, "10h 0m 0s");
        assert_eq!(summary.sun_position, "285° (Northwest)");
        assert_eq!(summary.arrow_rotation, 105.0);

        let cloud = summary.cloud.expect("forecast present");
        assert_eq!(cloud.coverage_pct, 40);
        assert_eq!(cloud.visibility_pct, 60);
        assert_eq!(cloud.outlook, Outlook::Partial);
    }

    #[test]
    fn summary_without_forecast_has_no_cloud_section() {
        let coordinate = Coordinate::new(0.0, 0.0).unwrap();
        let report = SunReport::new(coordinate, 270.0, SunData::default());
        let summary = Summary::from_report_in(&report, &Utc);

        assert!(summary.cloud.is_none());
        assert_eq!(summary.sunset, UNKNOWN);
        assert_eq!(summary.day_length, UNKNOWN);
    }
}
