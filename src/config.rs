//! Configuration loading from TOML with environment variable overrides.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section has defaults, so a partial (or missing) file still
//! yields a runnable configuration.

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::strategy::SelectorConfig;

/// Env var naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "TRENDBOARD_CONFIG";
/// Env var overriding `[data] path`.
pub const DATA_FILE_ENV: &str = "TRENDBOARD_DATA_FILE";
/// Env var overriding `[dashboard] port`.
pub const PORT_ENV: &str = "TRENDBOARD_PORT";

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub dashboard: DashboardConfig,
    pub selector: SelectorConfig,
    pub presentation: PresentationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    /// Trend file to read on every request.
    pub path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: "data.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/assets` (banner image, social icons).
    pub assets_dir: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            assets_dir: "assets".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PresentationConfig {
    pub page_title: String,
    pub heading: String,
    pub tagline: String,
    /// Image shown under the bet of the day, relative to the assets dir.
    pub image: Option<String>,
    pub links: Vec<SocialLink>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            page_title: "Laxra-Bet".to_string(),
            heading: "Today Trend".to_string(),
            tagline: "Bet Responsibly:".to_string(),
            image: Some("paris-2024-olympics-soccer.jpg".to_string()),
            links: vec![
                SocialLink::new("Gmail", "mailto:someone@example.com", "gmail.svg"),
                SocialLink::new("WhatsApp", "https://wa.me/1234567890", "whatsapp.svg"),
                SocialLink::new("YouTube", "https://www.youtube.com/@WrestlingWarzone1", "youtube.svg"),
                SocialLink::new("TikTok", "https://www.tiktok.com/@someusername", "tiktok.svg"),
            ],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    /// Icon file, relative to the assets dir.
    pub icon: String,
}

impl SocialLink {
    pub fn new(name: &str, url: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse and validate configuration text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Like `load`, but falls back to defaults when the file does not exist.
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            warn!(path, "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DATA_FILE_ENV) {
            self.data.path = path;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.dashboard.port = port
                .trim()
                .parse()
                .with_context(|| format!("{PORT_ENV} is not a valid port: {port}"))?;
        }
        Ok(())
    }

    /// Reject selector bands that can never match anything.
    pub fn validate(&self) -> Result<()> {
        let s = &self.selector;
        let bounds = [
            ("combo_min_odds", s.combo_min_odds),
            ("combo_max_odds", s.combo_max_odds),
            ("min_product", s.min_product),
            ("max_product", s.max_product),
            ("single_min_odds", s.single_min_odds),
            ("single_max_odds", s.single_max_odds),
        ];
        for (name, value) in bounds {
            if value <= Decimal::ZERO {
                bail!("selector.{name} must be positive, got {value}");
            }
        }
        if s.combo_min_odds > s.combo_max_odds {
            bail!("selector.combo_min_odds exceeds combo_max_odds");
        }
        if s.min_product >= s.max_product {
            bail!("selector.min_product must be below max_product");
        }
        if s.single_min_odds > s.single_max_odds {
            bail!("selector.single_min_odds exceeds single_max_odds");
        }
        Ok(())
    }
}
