//! Moving Average Convergence Divergence (MACD) line.

use rust_decimal::Decimal;

use crate::core::{resize, Indicator, IndicatorError, IndicatorResult, OrOverflow};

/// Difference between two embedded indicators evaluated over the same window.
///
/// Both members are arbitrary [`Indicator`]s, classically a fast and a slow EMA.
#[derive(Debug, Default)]
pub struct Macd {
    /// Minuend, usually the fast average.
    pub indicator1: Option<Box<dyn Indicator>>,
    /// Subtrahend, usually the slow average.
    pub indicator2: Option<Box<dyn Indicator>>,
}

impl Macd {
    /// Creates a MACD line as `indicator1 - indicator2`.
    pub fn new(
        indicator1: impl Indicator + 'static,
        indicator2: impl Indicator + 'static,
    ) -> Self {
        Self {
            indicator1: Some(Box::new(indicator1)),
            indicator2: Some(Box::new(indicator2)),
        }
    }

    fn members(&self) -> IndicatorResult<(&dyn Indicator, &dyn Indicator)> {
        match (&self.indicator1, &self.indicator2) {
            (Some(first), Some(second)) => Ok((&**first, &**second)),
            _ => Err(IndicatorError::not_set("MACD")),
        }
    }
}

impl Indicator for Macd {
    fn validate(&self) -> IndicatorResult<()> {
        let (first, second) = self.members()?;
        first.validate()?;
        second.validate()
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        self.validate()?;
        let window = resize(prices, self.count())?;
        let (first, second) = self.members()?;
        tracing::trace!(window = window.len(), "evaluating MACD members");
        first
            .calc(window)?
            .checked_sub(second.calc(window)?)
            .or_overflow("MACD")
    }

    fn count(&self) -> usize {
        let first = self.indicator1.as_ref().map_or(0, |ind| ind.count());
        let second = self.indicator2.as_ref().map_or(0, |ind| ind.count());
        first.max(second)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::Macd;
    use crate::indicators::{Ema, Sma};
    use crate::{Indicator, IndicatorError};

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn subtracts_members_over_shared_window() {
        let macd = Macd::new(Ema::new(2), Sma::new(3));
        let prices = ["1", "2", "3"].map(dec);
        // EMA(2) = 2.5, SMA(3) = 2
        assert_eq!(macd.calc(&prices).unwrap().round_dp(8), dec("0.5"));
    }

    #[test]
    fn count_takes_longest_member() {
        assert_eq!(Macd::new(Ema::new(12), Ema::new(26)).count(), 51);
        assert_eq!(Macd::new(Sma::new(30), Ema::new(3)).count(), 30);
    }

    #[test]
    fn absent_members_are_not_set() {
        let missing_second = Macd {
            indicator1: Some(Box::new(Sma::new(3))),
            indicator2: None,
        };
        assert_eq!(missing_second.validate(), Err(IndicatorError::not_set("MACD")));
        assert_eq!(Macd::default().validate(), Err(IndicatorError::not_set("MACD")));
    }

    #[test]
    fn opposite_extremes_overflow() {
        #[derive(Debug)]
        struct Fixed(Decimal);

        impl Indicator for Fixed {
            fn validate(&self) -> crate::IndicatorResult<()> {
                Ok(())
            }

            fn calc(&self, _prices: &[Decimal]) -> crate::IndicatorResult<Decimal> {
                Ok(self.0)
            }

            fn count(&self) -> usize {
                1
            }
        }

        let macd = Macd::new(Fixed(Decimal::MAX), Fixed(Decimal::MIN));
        assert_eq!(
            macd.calc(&[dec("1")]),
            Err(IndicatorError::Overflow { indicator: "MACD" })
        );
    }

    #[test]
    fn member_errors_pass_through() {
        let macd = Macd::new(Sma::new(0), Sma::new(3));
        assert_eq!(
            macd.validate(),
            Err(IndicatorError::InvalidLength { indicator: "SMA" })
        );
        let macd = Macd::new(Sma::new(2), Sma::new(3));
        assert_eq!(
            macd.calc(&[dec("1")]),
            Err(IndicatorError::InvalidCandleCount {
                required: 3,
                actual: 1
            })
        );
    }
}
