use indc_indicators::IndicatorError;
use thiserror::Error;

/// Result alias for descriptor decoding and settings loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures raised while turning external configuration into indicators.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The descriptor decoded but the indicator rejected it (unknown tag, bad trend, ...).
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
    /// The descriptor has the wrong shape or field types.
    #[error("malformed {indicator} descriptor: {reason}")]
    Malformed {
        /// Tag of the descriptor being decoded.
        indicator: String,
        /// Underlying decoding failure.
        reason: String,
    },
    /// No descriptor is stored under the requested alias.
    #[error("no indicator named `{0}` in settings")]
    UnknownAlias(String),
    /// Settings sources could not be read or merged.
    #[error("failed to load settings: {0}")]
    Load(String),
}

impl ConfigError {
    pub(crate) fn malformed(indicator: &str, reason: impl ToString) -> Self {
        Self::Malformed {
            indicator: indicator.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(value: config::ConfigError) -> Self {
        Self::Load(value.to_string())
    }
}
