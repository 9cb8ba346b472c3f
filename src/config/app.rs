//! Main application configuration
//!
//! This module defines the top-level configuration for the elo-ladder CLI,
//! including TOML file loading, environment variable overrides and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "elo-ladder".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Override settings from environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| env::var(key).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        // Service settings
        if let Some(name) = var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Some(log_level) = var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Some(base_elo) = var("ELO_BASE") {
            self.rating.base_elo = base_elo
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_BASE value: {}", base_elo))?;
        }
        if let Some(k_factor) = var("ELO_K_FACTOR") {
            self.rating.k_factor = k_factor
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_K_FACTOR value: {}", k_factor))?;
        }
        if let Some(rankings) = var("ELO_RANKINGS") {
            self.rating.rankings = rankings
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_RANKINGS value: {}", rankings))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config.rating.validate()?;

    Ok(())
}
