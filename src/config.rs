use std::time::Duration;
use thiserror::Error;

use crate::dashboard::DashboardMode;
use crate::services::api::DEFAULT_BASE_URL;
use crate::sim::demo::{DEFAULT_MAX_INTERVAL, DEFAULT_MIN_INTERVAL};
use crate::store::SimulationDelays;

pub const ENV_API_BASE_URL: &str = "FARELINE_API_BASE_URL";
pub const ENV_MODE: &str = "FARELINE_MODE";
pub const ENV_POLL_MS: &str = "FARELINE_POLL_MS";
pub const ENV_AUTO_FALLBACK: &str = "FARELINE_AUTO_FALLBACK";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}: expected `live` or `demo`, got `{value}`")]
    InvalidMode { var: &'static str, value: String },
    #[error("{var}: expected a positive number of milliseconds, got `{value}`")]
    InvalidDuration { var: &'static str, value: String },
    #[error("{var}: expected true or false, got `{value}`")]
    InvalidFlag { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub mode: DashboardMode,
    /// How often live mode polls trip, reasoning and logs.
    pub poll_interval: Duration,
    /// Switch to demo mode when a live refresh fails.
    pub auto_fallback: bool,
    pub demo_min_interval: Duration,
    pub demo_max_interval: Duration,
    pub delays: SimulationDelays,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            mode: DashboardMode::Live,
            poll_interval: Duration::from_secs(5),
            auto_fallback: true,
            demo_min_interval: DEFAULT_MIN_INTERVAL,
            demo_max_interval: DEFAULT_MAX_INTERVAL,
            delays: SimulationDelays::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }

        if let Some(value) = lookup(ENV_MODE) {
            config.mode = match value.trim().to_ascii_lowercase().as_str() {
                "live" => DashboardMode::Live,
                "demo" => DashboardMode::Demo,
                _ => return Err(ConfigError::InvalidMode { var: ENV_MODE, value }),
            };
        }

        if let Some(value) = lookup(ENV_POLL_MS) {
            match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.poll_interval = Duration::from_millis(ms),
                _ => return Err(ConfigError::InvalidDuration { var: ENV_POLL_MS, value }),
            }
        }

        if let Some(value) = lookup(ENV_AUTO_FALLBACK) {
            config.auto_fallback = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(ConfigError::InvalidFlag { var: ENV_AUTO_FALLBACK, value }),
            };
        }

        Ok(config)
    }
}
