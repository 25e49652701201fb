//! Weighted Moving Average (WMA).

use rust_decimal::Decimal;

use crate::core::{
    checked_sum, decimal_from_usize, resize, Indicator, IndicatorError, IndicatorResult,
    OrOverflow,
};

/// Linearly weighted mean where the newest price carries the largest weight.
///
/// The `i`-th price of the window (1-indexed, oldest first) is weighted by
/// `i / (length * (length + 1) / 2)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wma {
    /// Number of prices weighted.
    pub length: usize,
}

impl Wma {
    /// Creates a WMA over `length` prices.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Indicator for Wma {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 {
            return Err(IndicatorError::invalid_length("WMA"));
        }
        Ok(())
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        self.validate()?;
        let window = resize(prices, self.count())?;
        let weight_sum = decimal_from_usize(self.length * (self.length + 1) / 2);
        let weighted = window
            .iter()
            .enumerate()
            .map(|(idx, price)| price.checked_mul(decimal_from_usize(idx + 1)))
            .collect::<Option<Vec<_>>>()
            .and_then(checked_sum)
            .or_overflow("WMA")?;
        weighted.checked_div(weight_sum).or_overflow("WMA")
    }

    fn count(&self) -> usize {
        self.length
    }
}
