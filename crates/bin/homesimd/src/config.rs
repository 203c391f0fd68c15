//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `homesim.toml` in the working directory, or at the path named by
//! `HOMESIM_CONFIG`. Every field has a sensible default so the file is
//! optional; without it no device is simulated. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use homesim_domain::device::{DeviceConfig, validate_devices};
use homesim_domain::error::HomesimError;

const DEFAULT_PATH: &str = "homesim.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Host adapter settings.
    pub host: HostConfig,
    /// Devices to simulate, one accessory each.
    pub devices: Vec<DeviceConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// In-memory host configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Capacity of the characteristic-change broadcast channel.
    pub event_capacity: usize,
}

impl Config {
    /// Load configuration from `homesim.toml` (or `HOMESIM_CONFIG`) if
    /// present, then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, names an
    /// unknown device type or sensor, or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("HOMESIM_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOMESIM_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.event_capacity == 0 {
            return Err(ConfigError::Validation(
                "event_capacity must be non-zero".to_string(),
            ));
        }
        validate_devices(&self.devices)?;
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homesimd=info,homesim_app=info,homesim_adapter_memory=info".to_string(),
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            event_capacity: 256,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// A device entry violates a domain invariant.
    #[error("invalid device list")]
    Devices(#[from] HomesimError),
}
