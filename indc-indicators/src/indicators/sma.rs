//! Simple Moving Average (SMA).

use rust_decimal::Decimal;

use crate::core::{
    checked_sum, decimal_from_usize, resize, Indicator, IndicatorError, IndicatorResult,
    OrOverflow,
};

/// Arithmetic mean of the most recent `length` prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sma {
    /// Number of prices averaged.
    pub length: usize,
}

impl Sma {
    /// Creates an SMA over `length` prices.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Indicator for Sma {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 {
            return Err(IndicatorError::invalid_length("SMA"));
        }
        Ok(())
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        self.validate()?;
        let window = resize(prices, self.count())?;
        checked_sum(window.iter().copied())
            .and_then(|sum| sum.checked_div(decimal_from_usize(self.length)))
            .or_overflow("SMA")
    }

    fn count(&self) -> usize {
        self.length
    }
}
