//! Stochastic oscillator (%K).

use rust_decimal::Decimal;

use crate::core::{resize, Indicator, IndicatorError, IndicatorResult, OrOverflow};

/// Position of the latest price within the window's low-high range, scaled to 0-100.
///
/// A flat window has no range and reports the midpoint, 50.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stoch {
    /// Number of prices in the window.
    pub length: usize,
}

impl Stoch {
    /// Creates a stochastic oscillator over `length` prices.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Indicator for Stoch {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 {
            return Err(IndicatorError::invalid_length("STOCH"));
        }
        Ok(())
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        self.validate()?;
        let window = resize(prices, self.count())?;

        let mut low = window[0];
        let mut high = window[0];
        for price in window {
            low = low.min(*price);
            high = high.max(*price);
        }

        let range = high.checked_sub(low).or_overflow("STOCH")?;
        if range.is_zero() {
            return Ok(Decimal::from(50));
        }
        let last = window[window.len() - 1];
        Ok((last - low) / range * Decimal::ONE_HUNDRED)
    }

    fn count(&self) -> usize {
        self.length
    }
}
