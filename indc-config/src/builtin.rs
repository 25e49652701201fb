//! Factories for the indicators shipped with `indc-indicators`.

use std::sync::Arc;

use indc_indicators::indicators::{
    Aroon, Cci, Dema, Ema, Hma, Macd, Roc, Rsi, Sma, Stoch, Trend, Wma,
};
use indc_indicators::{Indicator, IndicatorError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};
use crate::registry::{IndicatorFactory, IndicatorRegistry};

pub(crate) fn factories() -> Vec<Arc<dyn IndicatorFactory>> {
    vec![
        Arc::new(AroonFactory),
        Arc::new(CciFactory),
        Arc::new(LengthFactory::new("dema", "DEMA", |length| Box::new(Dema::new(length)))),
        Arc::new(LengthFactory::new("ema", "EMA", |length| Box::new(Ema::new(length)))),
        Arc::new(HmaFactory),
        Arc::new(MacdFactory),
        Arc::new(LengthFactory::new("roc", "ROC", |length| Box::new(Roc::new(length)))),
        Arc::new(LengthFactory::new("rsi", "RSI", |length| Box::new(Rsi::new(length)))),
        Arc::new(LengthFactory::new("sma", "SMA", |length| Box::new(Sma::new(length)))),
        Arc::new(
            LengthFactory::new("stoch", "STOCH", |length| Box::new(Stoch::new(length)))
                .with_aliases(&["stochastic"]),
        ),
        Arc::new(LengthFactory::new("wma", "WMA", |length| Box::new(Wma::new(length)))),
    ]
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LengthParams {
    length: i64,
}

impl LengthParams {
    /// Negative lengths fail with the error a zero length gets from validation.
    fn length(&self, indicator: &'static str) -> ConfigResult<usize> {
        usize::try_from(self.length)
            .map_err(|_| IndicatorError::InvalidLength { indicator }.into())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AroonParams {
    trend: String,
    length: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CciParams {
    indicator: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HmaParams {
    wma: Option<LengthParams>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MacdParams {
    indicator1: Option<Value>,
    indicator2: Option<Value>,
}

fn parse<T: DeserializeOwned>(name: &str, params: &Value) -> ConfigResult<T> {
    T::deserialize(params).map_err(|err| ConfigError::malformed(name, err))
}

fn embedded(
    registry: &IndicatorRegistry,
    descriptor: Option<Value>,
) -> ConfigResult<Option<Box<dyn Indicator>>> {
    descriptor
        .filter(|value| !value.is_null())
        .map(|value| registry.decode(&value))
        .transpose()
}

struct LengthFactory {
    name: &'static str,
    label: &'static str,
    aliases: &'static [&'static str],
    make: fn(usize) -> Box<dyn Indicator>,
}

impl LengthFactory {
    fn new(
        name: &'static str,
        label: &'static str,
        make: fn(usize) -> Box<dyn Indicator>,
    ) -> Self {
        Self {
            name,
            label,
            aliases: &[],
            make,
        }
    }

    fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

impl IndicatorFactory for LengthFactory {
    fn canonical_name(&self) -> &'static str {
        self.name
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    fn build(
        &self,
        params: &Value,
        _registry: &IndicatorRegistry,
    ) -> ConfigResult<Box<dyn Indicator>> {
        let params: LengthParams = parse(self.name, params)?;
        Ok((self.make)(params.length(self.label)?))
    }
}

struct AroonFactory;

impl IndicatorFactory for AroonFactory {
    fn canonical_name(&self) -> &'static str {
        "aroon"
    }

    fn build(
        &self,
        params: &Value,
        _registry: &IndicatorRegistry,
    ) -> ConfigResult<Box<dyn Indicator>> {
        let params: AroonParams = parse("aroon", params)?;
        let trend: Trend = params.trend.parse()?;
        let length = LengthParams {
            length: params.length,
        }
        .length("AROON")?;
        Ok(Box::new(Aroon::new(trend, length)))
    }
}

struct CciFactory;

impl IndicatorFactory for CciFactory {
    fn canonical_name(&self) -> &'static str {
        "cci"
    }

    fn build(
        &self,
        params: &Value,
        registry: &IndicatorRegistry,
    ) -> ConfigResult<Box<dyn Indicator>> {
        let params: CciParams = parse("cci", params)?;
        Ok(Box::new(Cci {
            indicator: embedded(registry, params.indicator)?,
        }))
    }
}

struct HmaFactory;

impl IndicatorFactory for HmaFactory {
    fn canonical_name(&self) -> &'static str {
        "hma"
    }

    fn build(
        &self,
        params: &Value,
        _registry: &IndicatorRegistry,
    ) -> ConfigResult<Box<dyn Indicator>> {
        let params: HmaParams = parse("hma", params)?;
        let wma = match params.wma {
            Some(base) => Some(Wma::new(base.length("WMA")?)),
            None => None,
        };
        Ok(Box::new(Hma { wma }))
    }
}

struct MacdFactory;

impl IndicatorFactory for MacdFactory {
    fn canonical_name(&self) -> &'static str {
        "macd"
    }

    fn build(
        &self,
        params: &Value,
        registry: &IndicatorRegistry,
    ) -> ConfigResult<Box<dyn Indicator>> {
        let params: MacdParams = parse("macd", params)?;
        Ok(Box::new(Macd {
            indicator1: embedded(registry, params.indicator1)?,
            indicator2: embedded(registry, params.indicator2)?,
        }))
    }
}
