//! Configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) yields a working demo scene: the device 500 units up, the target
//! at (150, 600, 220).

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::spatial::Point3;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "SIGHTLINE_CONFIG";

/// File name looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "sightline.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SightlineConfig {
    #[serde(default)]
    pub locations: LocationsConfig,
    #[serde(default)]
    pub sensors: SensorsConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Initial device and target positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationsConfig {
    #[serde(default = "default_device")]
    pub device: Point3,
    #[serde(default = "default_target")]
    pub target: Point3,
}

fn default_device() -> Point3 {
    Point3::new(0.0, 0.0, 500.0)
}

fn default_target() -> Point3 {
    Point3::new(150.0, 600.0, 220.0)
}

impl Default for LocationsConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            target: default_target(),
        }
    }
}

/// Sensor registration settings handed to the sensor hub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorsConfig {
    /// Requested delivery period per sensor, microseconds
    #[serde(default = "default_sample_period_us")]
    pub sample_period_us: u64,
}

fn default_sample_period_us() -> u64 {
    20_000
}

impl Default for SensorsConfig {
    fn default() -> Self {
        Self {
            sample_period_us: default_sample_period_us(),
        }
    }
}

impl SensorsConfig {
    pub fn sample_period(&self) -> Duration {
        Duration::from_micros(self.sample_period_us)
    }
}

/// Thresholds for rejecting degenerate samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Projection systems with `|det|` below this are treated as singular
    #[serde(default = "default_epsilon")]
    pub singular_epsilon: f64,
    /// Distances below this count as zero (target on device, target on normal)
    #[serde(default = "default_epsilon")]
    pub coincident_epsilon: f64,
}

fn default_epsilon() -> f64 {
    1e-9
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            singular_epsilon: default_epsilon(),
            coincident_epsilon: default_epsilon(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SightlineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SightlineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Locate and load the configuration.
    ///
    /// Order: explicit path, `SIGHTLINE_CONFIG`, the platform config
    /// directory, then built-in defaults. An explicit or env path that does
    /// not exist is an error; a missing platform file is not.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            debug!("Loading config from ${}: {}", CONFIG_ENV_VAR, path);
            return Self::from_file(Path::new(&path));
        }

        if let Some(path) = Self::default_path().filter(|p| p.exists()) {
            debug!("Loading config from {}", path.display());
            return Self::from_file(&path);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// `sightline.toml` in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "sightline").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("engine.singular_epsilon", self.engine.singular_epsilon),
            ("engine.coincident_epsilon", self.engine.coincident_epsilon),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }

        if self.sensors.sample_period_us == 0 {
            return Err(ConfigError::Invalid(
                "sensors.sample_period_us must be greater than zero".to_string(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level must not be empty".to_string()));
        }

        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
