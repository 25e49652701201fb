//! Exponential Moving Average (EMA).

use rust_decimal::Decimal;

use crate::core::{
    decimal_from_usize, resize, Indicator, IndicatorError, IndicatorResult, OrOverflow,
};
use crate::indicators::sma::Sma;

/// Exponentially weighted average seeded with an SMA.
///
/// The window spans `2 * length - 1` prices: the first `length` seed the
/// average and the remaining `length - 1` are folded in with the multiplier
/// `2 / (length + 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ema {
    /// Smoothing period.
    pub length: usize,
}

impl Ema {
    /// Creates an EMA with the provided smoothing period.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Folds a single `price` into the `previous` EMA value.
    pub fn calc_next(&self, previous: Decimal, price: Decimal) -> IndicatorResult<Decimal> {
        let multiplier = self.multiplier();
        let weighted = price.checked_mul(multiplier).or_overflow("EMA")?;
        let carried = previous
            .checked_mul(Decimal::ONE - multiplier)
            .or_overflow("EMA")?;
        weighted.checked_add(carried).or_overflow("EMA")
    }

    fn multiplier(&self) -> Decimal {
        Decimal::TWO / decimal_from_usize(self.length + 1)
    }
}

impl Indicator for Ema {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 {
            return Err(IndicatorError::invalid_length("EMA"));
        }
        Ok(())
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        self.validate()?;
        let window = resize(prices, self.count())?;
        let (seed, rest) = window.split_at(self.length);
        let start = Sma::new(self.length).calc(seed)?;
        rest.iter()
            .try_fold(start, |previous, price| self.calc_next(previous, *price))
    }

    fn count(&self) -> usize {
        self.length.saturating_mul(2).saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::Ema;
    use crate::{Indicator, IndicatorError};

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn seeds_with_sma_then_smooths() {
        let ema = Ema::new(3);
        let prices = ["1", "2", "3", "4", "5"].map(dec);
        // seed = 2, multiplier = 0.5: 0.5*4 + 0.5*2 = 3, 0.5*5 + 0.5*3 = 4
        assert_eq!(ema.calc(&prices).unwrap(), dec("4"));
    }

    #[test]
    fn calc_next_applies_multiplier() {
        let ema = Ema::new(3);
        assert_eq!(ema.calc_next(dec("2"), dec("4")), Ok(dec("3")));
        assert_eq!(Ema::new(1).calc_next(dec("10"), dec("7")), Ok(dec("7")));
    }

    #[test]
    fn count_covers_seed_and_fold() {
        assert_eq!(Ema::new(15).count(), 29);
        assert_eq!(Ema::new(1).count(), 1);
        assert_eq!(Ema::new(0).count(), 0);
        assert_eq!(Ema::new(usize::MAX).count(), usize::MAX - 1);
    }

    #[test]
    fn extreme_seed_overflows() {
        let prices = [Decimal::MAX, Decimal::MAX, dec("1")];
        assert_eq!(
            Ema::new(2).calc(&prices),
            Err(IndicatorError::Overflow { indicator: "SMA" })
        );
    }

    #[test]
    fn rejects_short_history() {
        let prices = ["1", "2", "3", "4"].map(dec);
        assert_eq!(
            Ema::new(3).calc(&prices),
            Err(IndicatorError::InvalidCandleCount {
                required: 5,
                actual: 4
            })
        );
    }
}
