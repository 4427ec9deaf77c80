use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::geolocation::DEFAULT_IP_GEOLOCATION_URL;

pub const API_KEY_ENV: &str = "WEATHER_API_KEY";
pub const DEFAULT_CITY: &str = "서울";
pub const DEFAULT_GEOLOCATION_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "부산"
/// geolocation_timeout_secs = 3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// WeatherAPI.com key. `WEATHER_API_KEY` overrides it.
    pub api_key: Option<String>,

    /// City used when none is given on the command line.
    pub default_city: Option<String>,

    pub geolocation_timeout_secs: Option<u64>,

    pub http_timeout_secs: Option<u64>,

    /// IP geolocation endpoint used by `--gps`.
    pub geolocation_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-advice", "weather-advice")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Pick the API key: a non-empty environment value wins over the file.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Result<String> {
        env_value
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|key| !key.trim().is_empty()))
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `weather-advice configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn default_city(&self) -> &str {
        self.default_city.as_deref().unwrap_or(DEFAULT_CITY)
    }

    pub fn geolocation_timeout_secs(&self) -> u64 {
        self.geolocation_timeout_secs.unwrap_or(DEFAULT_GEOLOCATION_TIMEOUT_SECS)
    }

    pub fn http_timeout_secs(&self) -> u64 {
        self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
    }

    pub fn geolocation_url(&self) -> &str {
        self.geolocation_url.as_deref().unwrap_or(DEFAULT_IP_GEOLOCATION_URL)
    }
}
