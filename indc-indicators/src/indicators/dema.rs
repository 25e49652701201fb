//! Double Exponential Moving Average (DEMA).

use rust_decimal::Decimal;

use crate::core::{resize, Indicator, IndicatorError, IndicatorResult};
use crate::indicators::ema::Ema;
use crate::indicators::sma::Sma;

/// EMA applied twice: once over the prices, then over the resulting EMA series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dema {
    /// Smoothing period shared by both passes.
    pub length: usize,
}

impl Dema {
    /// Creates a DEMA with the provided smoothing period.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Indicator for Dema {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 {
            return Err(IndicatorError::invalid_length("DEMA"));
        }
        Ok(())
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        self.validate()?;
        let window = resize(prices, self.count())?;
        let (seed, rest) = window.split_at(self.length);
        let ema = Ema::new(self.length);

        let mut smoothed = Vec::with_capacity(self.length);
        let mut previous = Sma::new(self.length).calc(seed)?;
        smoothed.push(previous);
        for price in rest {
            previous = ema.calc_next(previous, *price)?;
            smoothed.push(previous);
        }

        smoothed
            .iter()
            .try_fold(smoothed[0], |acc, value| ema.calc_next(acc, *value))
    }

    fn count(&self) -> usize {
        self.length.saturating_mul(2).saturating_sub(1)
    }
}
