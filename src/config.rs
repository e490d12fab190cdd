use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::{PowerStation, StationError};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "PS__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] figment::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
    #[error(transparent)]
    Station(#[from] StationError),
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub station: StationConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Station ratings, fixed for the lifetime of the station
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StationConfig {
    #[validate(range(exclusive_min = 0.0))]
    pub battery_capacity_wh: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub maximum_input_w: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub maximum_output_w: f64,
}

impl StationConfig {
    pub fn build(&self) -> Result<PowerStation, StationError> {
        PowerStation::try_new(self.battery_capacity_wh, self.maximum_input_w, self.maximum_output_w)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// `walkthrough`, `status-check` or `all`
    #[serde(default = "default_scenario")]
    pub scenario: String,
    /// Print each step as a JSON snapshot instead of a text line
    #[serde(default)]
    pub print_json: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { scenario: default_scenario(), print_json: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub json: bool,
    /// Fallback filter when RUST_LOG is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { json: false, filter: default_filter() }
    }
}

fn default_scenario() -> String {
    "all".to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Layer `config/default.toml` under `PS__`-prefixed environment variables
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file(DEFAULT_CONFIG_PATH))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }
}
