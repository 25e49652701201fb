#![deny(missing_docs)]

//! Configuration boundary for `indc`: decodes tagged indicator descriptors and
//! loads named descriptors from layered settings.

mod builtin;
mod error;
/// Descriptor registry and factory contract.
pub mod registry;
/// Settings loading.
pub mod settings;

pub use crate::error::{ConfigError, ConfigResult};
pub use crate::registry::{
    builtin_indicator_names, indicator_registry, load_indicator, load_indicator_toml,
    register_indicator_factory, IndicatorFactory, IndicatorRegistry,
};
pub use crate::settings::{load_config, IndcConfig, LoggingConfig};
