//! Rate of Change (ROC).

use rust_decimal::Decimal;

use crate::core::{resize, Indicator, IndicatorError, IndicatorResult, OrOverflow};

/// Percentage change between the first and last price of the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Roc {
    /// Number of prices spanned, inclusive of both ends.
    pub length: usize,
}

impl Roc {
    /// Creates a ROC spanning `length` prices.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Indicator for Roc {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 {
            return Err(IndicatorError::invalid_length("ROC"));
        }
        Ok(())
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        self.validate()?;
        let window = resize(prices, self.count())?;
        let first = window[0];
        let last = window[window.len() - 1];
        if first.is_zero() {
            return Ok(Decimal::ZERO);
        }
        last.checked_sub(first)
            .and_then(|change| change.checked_div(first))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .or_overflow("ROC")
    }

    fn count(&self) -> usize {
        self.length
    }
}
