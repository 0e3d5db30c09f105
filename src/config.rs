// src/config.rs

use crate::errors::AppError;
use crate::pipeline::PipelineSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "krisha.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub pipeline: PipelineSettings,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub max_pages: usize,
    pub timeout_secs: u64,
    pub max_attempts: u64,
    pub page_delay_ms: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://krisha.kz/".to_string(),
            max_pages: 10,
            timeout_secs: 30,
            max_attempts: 3,
            page_delay_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub database_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            database_path: PathBuf::from("krisha_runs.sqlite3"),
        }
    }
}

impl Config {
    /// Reads `path` if given, otherwise `krisha.toml` when it exists.
    /// No file at all means built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !default.exists() {
                    tracing::debug!("no {DEFAULT_CONFIG_PATH}, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("reading {}: {e}", path.display())))?;
        let config = Self::from_toml(&text)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// A supported country/city pair and its slug in krisha.kz URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    pub country: String,
    pub city: String,
    pub slug: String,
}

const SUPPORTED_MARKETS: &[(&str, &str, &str)] = &[("kazakhstan", "almaty", "almaty")];

impl Market {
    pub fn resolve(country: &str, city: &str) -> Result<Self, AppError> {
        let country = country.trim().to_lowercase();
        let city = city.trim().to_lowercase();

        if !SUPPORTED_MARKETS.iter().any(|(c, _, _)| *c == country) {
            return Err(AppError::UnsupportedMarket(format!(
                "Currently only Kazakhstan supported (got {country:?})."
            )));
        }

        SUPPORTED_MARKETS
            .iter()
            .find(|(c, ci, _)| *c == country && *ci == city)
            .map(|(c, ci, slug)| Market {
                country: c.to_string(),
                city: ci.to_string(),
                slug: slug.to_string(),
            })
            .ok_or_else(|| {
                AppError::UnsupportedMarket(format!("Currently only Almaty supported (got {city:?})."))
            })
    }
}
