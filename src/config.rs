//! Tool configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! are serialized to a TOML table and the user file is deep-merged on top,
//! so a config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [defaults]
//! filter = "nearest"        # Resize filter: nearest, bilinear, bicubic
//! bits_per_pixel = 32       # Blank canvas depth: 8, 16, 24 or 32
//!
//! [logging]
//! level = "info"            # trace, debug, info, warn, error, off
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Components, ResizeFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Fallbacks for CLI options that were not given.
    pub defaults: DefaultsConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Components::from_bits_per_pixel(self.defaults.bits_per_pixel).is_none() {
            return Err(ConfigError::Validation(format!(
                "defaults.bits_per_pixel must be 8, 16, 24 or 32, got {}",
                self.defaults.bits_per_pixel
            )));
        }
        if self.logging.level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of trace, debug, info, warn, error, off, got '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Filter used by `resize` when `--filter` is omitted.
    pub filter: ResizeFilter,
    /// Depth used by `blank` when `--bits-per-pixel` is omitted.
    pub bits_per_pixel: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            filter: ResizeFilter::Nearest,
            bits_per_pixel: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Stock defaults as a TOML table, the bottom layer of every load.
pub fn stock_table() -> Result<toml::Table, ConfigError> {
    Ok(toml::from_str(&toml::to_string(&Config::default())?)?)
}

/// Lay `overlay` over `base` in place. Sub-tables present on both sides are
/// combined key by key; anything else in `overlay` wins outright.
pub fn layer_onto(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        let toml::Value::Table(above) = value else {
            base.insert(key, value);
            continue;
        };
        if let Some(toml::Value::Table(below)) = base.get_mut(&key) {
            layer_onto(below, above);
            continue;
        }
        base.insert(key, toml::Value::Table(above));
    }
}

/// The user's `config.toml` in `dir`, or `None` when there is none.
fn read_user_table(dir: &Path) -> Result<Option<toml::Table>, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Build a [`Config`] from a layered table and check its values.
pub fn config_from_table(table: toml::Table) -> Result<Config, ConfigError> {
    let config: Config = toml::Value::Table(table).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Stock defaults with `dir/config.toml` (if any) layered on top.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let mut table = stock_table()?;
    if let Some(user) = read_user_table(dir)? {
        layer_onto(&mut table, user);
    }
    config_from_table(table)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# rasterbox configuration
# =======================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

[defaults]
# Resize filter used when --filter is not given.
# One of: "nearest", "bilinear", "bicubic".
filter = "nearest"

# Bits per pixel of a blank canvas when --bits-per-pixel is not given.
# 8 = gray, 16 = gray+alpha, 24 = RGB, 32 = RGBA.
bits_per_pixel = 32

[logging]
# Minimum level written to stderr: trace, debug, info, warn, error, off.
# The RUST_LOG environment variable overrides this.
level = "info"
"##
}
