use geo::Point;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::corridor::DEFAULT_CORRIDOR_RADIUS_M;
use crate::error::{Result, WildstepError};
use crate::viewport::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Corridor radius in meters for proximity tests
    pub corridor_radius_m: ConfigValue<f64>,
    /// Bounded retry count on the observation append path
    pub upload_retries: ConfigValue<u32>,
    /// Fallback map center when no tracks are selected
    pub default_center_lat: ConfigValue<f64>,
    pub default_center_lon: ConfigValue<f64>,
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            corridor_radius_m: ConfigValue::new(DEFAULT_CORRIDOR_RADIUS_M, ConfigSource::Default),
            upload_retries: ConfigValue::new(3, ConfigSource::Default),
            default_center_lat: ConfigValue::new(DEFAULT_CENTER_LAT, ConfigSource::Default),
            default_center_lon: ConfigValue::new(DEFAULT_CENTER_LON, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| WildstepError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| WildstepError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(radius) = file_config.corridor_radius_m {
            self.corridor_radius_m.update(radius, ConfigSource::File);
        }

        if let Some(retries) = file_config.upload_retries {
            self.upload_retries.update(retries, ConfigSource::File);
        }

        if let Some(lat) = file_config.default_center_lat {
            self.default_center_lat.update(lat, ConfigSource::File);
        }

        if let Some(lon) = file_config.default_center_lon {
            self.default_center_lon.update(lon, ConfigSource::File);
        }

        Ok(self)
    }

    /// The configured fallback map center as a geometry point (x = lon,
    /// y = lat), for
    /// [`estimate_viewport_with_default`](crate::viewport::estimate_viewport_with_default).
    pub fn default_center(&self) -> Point<f64> {
        Point::new(self.default_center_lon.value, self.default_center_lat.value)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // WILDSTEP_CORRIDOR_RADIUS_M
        if let Ok(radius_str) = env::var("WILDSTEP_CORRIDOR_RADIUS_M") {
            match radius_str.parse::<f64>() {
                Ok(radius) if radius > 0.0 => {
                    self.corridor_radius_m.update(radius, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid WILDSTEP_CORRIDOR_RADIUS_M value '{}': expected positive meters",
                    radius_str
                ),
            }
        }

        // WILDSTEP_UPLOAD_RETRIES
        if let Ok(retries_str) = env::var("WILDSTEP_UPLOAD_RETRIES") {
            match retries_str.parse::<u32>() {
                Ok(retries) => self.upload_retries.update(retries, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid WILDSTEP_UPLOAD_RETRIES value '{}': expected integer",
                    retries_str
                ),
            }
        }

        // WILDSTEP_DEFAULT_CENTER_LAT / WILDSTEP_DEFAULT_CENTER_LON
        if let Ok(lat_str) = env::var("WILDSTEP_DEFAULT_CENTER_LAT") {
            match lat_str.parse::<f64>() {
                Ok(lat) if (-90.0..=90.0).contains(&lat) => {
                    self.default_center_lat.update(lat, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid WILDSTEP_DEFAULT_CENTER_LAT value '{}': expected degrees in [-90, 90]",
                    lat_str
                ),
            }
        }

        if let Ok(lon_str) = env::var("WILDSTEP_DEFAULT_CENTER_LON") {
            match lon_str.parse::<f64>() {
                Ok(lon) if (-180.0..=180.0).contains(&lon) => {
                    self.default_center_lon.update(lon, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid WILDSTEP_DEFAULT_CENTER_LON value '{}': expected degrees in [-180, 180]",
                    lon_str
                ),
            }
        }

        self
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    corridor_radius_m: Option<f64>,
    upload_retries: Option<u32>,
    default_center_lat: Option<f64>,
    default_center_lon: Option<f64>,
}
