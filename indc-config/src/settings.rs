//! Layered settings: an optional TOML file overlaid with `INDC__` environment variables.

use std::collections::BTreeMap;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use indc_indicators::Indicator;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};
use crate::registry::load_indicator;

/// Top-level settings document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndcConfig {
    /// Log output settings.
    pub logging: LoggingConfig,
    /// Named indicator descriptors, keyed by alias.
    pub indicators: BTreeMap<String, Value>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl IndcConfig {
    /// Decodes the descriptor stored under `alias`.
    pub fn indicator(&self, alias: &str) -> ConfigResult<Box<dyn Indicator>> {
        let descriptor = self
            .indicators
            .get(alias)
            .ok_or_else(|| ConfigError::UnknownAlias(alias.to_string()))?;
        load_indicator(descriptor)
    }

    /// Aliases of every configured descriptor, sorted.
    pub fn indicator_names(&self) -> Vec<&str> {
        self.indicators.keys().map(String::as_str).collect()
    }
}

/// Loads settings from `path` (when given) and the environment.
pub fn load_config(path: Option<&Path>) -> ConfigResult<IndcConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }
    builder = builder.add_source(
        Environment::with_prefix("INDC")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );
    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}
