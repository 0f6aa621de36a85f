use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    model::Coordinate,
    provider::{seventimer, sunrise_sunset},
    tiles::TileSource,
};

/// Base URLs of the remote services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub sun_times: String,
    pub cloud_forecast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            sun_times: sunrise_sunset::DEFAULT_BASE_URL.to_string(),
            cloud_forecast: seventimer::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Location used by `skyfade show` when no coordinate is given.
    ///
    /// Example TOML:
    /// [home]
    /// latitude = 51.5072
    /// longitude = -0.1276
    pub home: Option<Coordinate>,

    #[serde(default)]
    pub endpoints: Endpoints,

    #[serde(default)]
    pub tiles: TileSource,
}

impl Config {
    /// Home location, validated. Errors with a hint when unset.
    pub fn home_coordinate(&self) -> Result<Coordinate> {
        let home = self.home.ok_or_else(|| {
            anyhow!(
                "No coordinate given and no home location configured.\n\
                 Hint: pass `LAT LNG` or run `skyfade configure` first."
            )
        })?;

        Coordinate::new(home.latitude, home.longitude)
            .context("Invalid home location in config")
    }

    pub fn set_home(&mut self, coordinate: Coordinate) {
        self.home = Some(coordinate);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyfade", "skyfade")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
