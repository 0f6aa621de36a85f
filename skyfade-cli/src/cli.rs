use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use inquire::CustomType;
use skyfade_core::{
    Config, Coordinate, Session, SunFetcher,
    heuristic::{current_month0, estimate_azimuth},
};

use crate::{explore, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyfade", version, about = "Where and when does the sun set?")]
pub struct Cli {
    /// More log output (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the home location used when `show` gets no coordinate.
    Configure,

    /// Show sunset time, direction and cloud forecast for a point.
    Show {
        /// Latitude in degrees, -90..=90.
        #[arg(allow_negative_numbers = true, requires = "longitude")]
        latitude: Option<f64>,

        /// Longitude in degrees, -180..=180.
        #[arg(allow_negative_numbers = true)]
        longitude: Option<f64>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Zoom level for the map tile link.
        #[arg(long, default_value_t = 12)]
        zoom: u8,
    },

    /// Estimate the sunset direction only; no network access.
    Direction {
        /// Latitude in degrees, -90..=90.
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Month 1-12; defaults to the current month.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Enter coordinates one per line; the latest one wins.
    Explore {
        /// Zoom level for the map tile links.
        #[arg(long, default_value_t = 12)]
        zoom: u8,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                latitude,
                longitude,
                json,
                zoom,
            } => {
                let config = Config::load()?;
                let coordinate = match (latitude, longitude) {
                    (Some(lat), Some(lng)) => Coordinate::new(lat, lng)?,
                    _ => {
                        let home = config.home_coordinate()?;
                        tracing::debug!(%home, "no coordinate given, using home location");
                        home
                    }
                };

                let fetcher = SunFetcher::from_config(&config);
                let mut session = Session::new();
                let ticket = session.select(coordinate);

                let result = fetcher.fetch(&coordinate).await;
                session.complete(ticket, result);

                render::print_state(session.state(), &config.tiles, zoom, json)
            }
            Command::Direction { latitude, month } => {
                // Reuse coordinate validation; longitude plays no part here.
                let coordinate = Coordinate::new(latitude, 0.0)?;
                let month0 = month.map(|m| m - 1).unwrap_or_else(current_month0);
                tracing::debug!(latitude, month0, "estimating direction offline");
                let azimuth = estimate_azimuth(coordinate.latitude, month0);

                println!("{}", render::direction_text(azimuth));
                Ok(())
            }
            Command::Explore { zoom } => {
                let config = Config::load()?;
                explore::run(&config, zoom).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let latitude = CustomType::<f64>::new("Home latitude:")
        .with_help_message("Degrees, -90 (south) to 90 (north)")
        .with_error_message("Please type a number")
        .prompt()
        .context("Failed to read latitude")?;

    let longitude = CustomType::<f64>::new("Home longitude:")
        .with_help_message("Degrees, -180 (west) to 180 (east)")
        .with_error_message("Please type a number")
        .prompt()
        .context("Failed to read longitude")?;

    let coordinate = Coordinate::new(latitude, longitude)?;
    config.set_home(coordinate);

    let path = config.save()?;
    println!("Saved home location {coordinate} to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_accepts_negative_coordinates() {
        let args = ["skyfade", "show", "40.7128", "-74.0060", "--json"];
        let cli = Cli::try_parse_from(args).expect("should parse");

        match cli.command {
            Command::Show {
                latitude,
                longitude,
                json,
                zoom,
            } => {
                assert_eq!(latitude, Some(40.7128));
                assert_eq!(longitude, Some(-74.006));
                assert!(json);
                assert_eq!(zoom, 12);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_without_coordinate_uses_home() {
        let cli = Cli::try_parse_from(["skyfade", "show"]).expect("should parse");
        assert!(matches!(
            cli.command,
            Command::Show {
                latitude: None,
                longitude: None,
                ..
            }
        ));
    }

    #[test]
    fn show_requires_both_halves() {
        assert!(Cli::try_parse_from(["skyfade", "show", "40.0"]).is_err());
    }

    #[test]
    fn direction_month_is_range_checked() {
        let args = ["skyfade", "direction", "-33.9", "--month", "13"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["skyfade", "-vv", "direction", "-33.9", "--month", "4"];
        let cli = Cli::try_parse_from(args).expect("should parse");
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Direction { month: Some(4), .. }));
    }
}
