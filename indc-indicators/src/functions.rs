//! One-call wrappers that build an indicator, then validate, calculate or count it.
//!
//! `calc_*` functions validate the configuration before calculating, exactly
//! like [`Indicator::calc`].

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorResult};
use crate::indicators::{Aroon, Cci, Dema, Ema, Hma, Macd, Roc, Rsi, Sma, Stoch, Trend, Wma};

/// Calculates an [`Aroon`] value.
pub fn calc_aroon(prices: &[Decimal], trend: Trend, length: usize) -> IndicatorResult<Decimal> {
    Aroon::new(trend, length).calc(prices)
}

/// Validates an [`Aroon`] configuration.
pub fn validate_aroon(trend: Trend, length: usize) -> IndicatorResult<()> {
    Aroon::new(trend, length).validate()
}

/// Samples required by an [`Aroon`] configuration.
pub fn count_aroon(trend: Trend, length: usize) -> usize {
    Aroon::new(trend, length).count()
}

/// Calculates a [`Cci`] around `indicator`.
pub fn calc_cci(
    prices: &[Decimal],
    indicator: impl Indicator + 'static,
) -> IndicatorResult<Decimal> {
    Cci::new(indicator).calc(prices)
}

/// Validates a [`Cci`] around `indicator`.
pub fn validate_cci(indicator: impl Indicator + 'static) -> IndicatorResult<()> {
    Cci::new(indicator).validate()
}

/// Samples required by a [`Cci`] around `indicator`.
pub fn count_cci(indicator: impl Indicator + 'static) -> usize {
    Cci::new(indicator).count()
}

/// Calculates a [`Dema`] value.
pub fn calc_dema(prices: &[Decimal], length: usize) -> IndicatorResult<Decimal> {
    Dema::new(length).calc(prices)
}

/// Validates a [`Dema`] configuration.
pub fn validate_dema(length: usize) -> IndicatorResult<()> {
    Dema::new(length).validate()
}

/// Samples required by a [`Dema`] configuration.
pub fn count_dema(length: usize) -> usize {
    Dema::new(length).count()
}

/// Calculates an [`Ema`] value.
pub fn calc_ema(prices: &[Decimal], length: usize) -> IndicatorResult<Decimal> {
    Ema::new(length).calc(prices)
}

/// Folds `price` into the `previous` EMA value for the given period.
pub fn calc_next_ema(
    previous: Decimal,
    price: Decimal,
    length: usize,
) -> IndicatorResult<Decimal> {
    Ema::new(length).calc_next(previous, price)
}

/// Validates an [`Ema`] configuration.
pub fn validate_ema(length: usize) -> IndicatorResult<()> {
    Ema::new(length).validate()
}

/// Samples required by an [`Ema`] configuration.
pub fn count_ema(length: usize) -> usize {
    Ema::new(length).count()
}

/// Calculates an [`Hma`] over a base WMA of `length` prices.
pub fn calc_hma(prices: &[Decimal], length: usize) -> IndicatorResult<Decimal> {
    Hma::with_length(length).calc(prices)
}

/// Validates an [`Hma`] over a base WMA of `length` prices.
pub fn validate_hma(length: usize) -> IndicatorResult<()> {
    Hma::with_length(length).validate()
}

/// Samples required by an [`Hma`] over a base WMA of `length` prices.
pub fn count_hma(length: usize) -> usize {
    Hma::with_length(length).count()
}

/// Calculates a [`Macd`] line as `indicator1 - indicator2`.
pub fn calc_macd(
    prices: &[Decimal],
    indicator1: impl Indicator + 'static,
    indicator2: impl Indicator + 'static,
) -> IndicatorResult<Decimal> {
    Macd::new(indicator1, indicator2).calc(prices)
}

/// Validates a [`Macd`] configuration.
pub fn validate_macd(
    indicator1: impl Indicator + 'static,
    indicator2: impl Indicator + 'static,
) -> IndicatorResult<()> {
    Macd::new(indicator1, indicator2).validate()
}

/// Samples required by a [`Macd`] configuration.
pub fn count_macd(
    indicator1: impl Indicator + 'static,
    indicator2: impl Indicator + 'static,
) -> usize {
    Macd::new(indicator1, indicator2).count()
}

/// Calculates a [`Roc`] value.
pub fn calc_roc(prices: &[Decimal], length: usize) -> IndicatorResult<Decimal> {
    Roc::new(length).calc(prices)
}

/// Validates a [`Roc`] configuration.
pub fn validate_roc(length: usize) -> IndicatorResult<()> {
    Roc::new(length).validate()
}

/// Samples required by a [`Roc`] configuration.
pub fn count_roc(length: usize) -> usize {
    Roc::new(length).count()
}

/// Calculates an [`Rsi`] value.
pub fn calc_rsi(prices: &[Decimal], length: usize) -> IndicatorResult<Decimal> {
    Rsi::new(length).calc(prices)
}

/// Validates an [`Rsi`] configuration.
pub fn validate_rsi(length: usize) -> IndicatorResult<()> {
    Rsi::new(length).validate()
}

/// Samples required by an [`Rsi`] configuration.
pub fn count_rsi(length: usize) -> usize {
    Rsi::new(length).count()
}

/// Calculates an [`Sma`] value.
pub fn calc_sma(prices: &[Decimal], length: usize) -> IndicatorResult<Decimal> {
    Sma::new(length).calc(prices)
}

/// Validates an [`Sma`] configuration.
pub fn validate_sma(length: usize) -> IndicatorResult<()> {
    Sma::new(length).validate()
}

/// Samples required by an [`Sma`] configuration.
pub fn count_sma(length: usize) -> usize {
    Sma::new(length).count()
}

/// Calculates a [`Stoch`] value.
pub fn calc_stoch(prices: &[Decimal], length: usize) -> IndicatorResult<Decimal> {
    Stoch::new(length).calc(prices)
}

/// Validates a [`Stoch`] configuration.
pub fn validate_stoch(length: usize) -> IndicatorResult<()> {
    Stoch::new(length).validate()
}

/// Samples required by a [`Stoch`] configuration.
pub fn count_stoch(length: usize) -> usize {
    Stoch::new(length).count()
}

/// Calculates a [`Wma`] value.
pub fn calc_wma(prices: &[Decimal], length: usize) -> IndicatorResult<Decimal> {
    Wma::new(length).calc(prices)
}

/// Validates a [`Wma`] configuration.
pub fn validate_wma(length: usize) -> IndicatorResult<()> {
    Wma::new(length).validate()
}

/// Samples required by a [`Wma`] configuration.
pub fn count_wma(length: usize) -> usize {
    Wma::new(length).count()
}
