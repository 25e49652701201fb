//! Relative Strength Index (RSI).

use rust_decimal::Decimal;

use crate::core::{
    decimal_from_usize, resize, Indicator, IndicatorError, IndicatorResult, OrOverflow,
};

/// Cutler-style RSI over a single window, scaled between 0 and 100.
///
/// Gains and losses between successive prices are summed and each divided by
/// `length`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rsi {
    /// Number of prices in the window.
    pub length: usize,
}

impl Rsi {
    /// Creates an RSI over `length` prices.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    fn compute_rsi(avg_gain: Decimal, avg_loss: Decimal) -> IndicatorResult<Decimal> {
        if avg_loss.is_zero() {
            return Ok(Decimal::ONE_HUNDRED);
        }
        if avg_gain.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let rs = avg_gain
            .checked_div(avg_loss)
            .and_then(|rs| rs.checked_add(Decimal::ONE))
            .or_overflow("RSI")?;
        Ok(Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED / rs)
    }
}

impl Indicator for Rsi {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 {
            return Err(IndicatorError::invalid_length("RSI"));
        }
        Ok(())
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        self.validate()?;
        let window = resize(prices, self.count())?;

        let mut gain_sum = Decimal::ZERO;
        let mut loss_sum = Decimal::ZERO;
        for pair in window.windows(2) {
            let change = pair[1].checked_sub(pair[0]).or_overflow("RSI")?;
            if change.is_sign_negative() {
                loss_sum = loss_sum.checked_add(change.abs()).or_overflow("RSI")?;
            } else {
                gain_sum = gain_sum.checked_add(change).or_overflow("RSI")?;
            }
        }

        let divisor = decimal_from_usize(self.length);
        Self::compute_rsi(gain_sum / divisor, loss_sum / divisor)
    }

    fn count(&self) -> usize {
        self.length
    }
}
