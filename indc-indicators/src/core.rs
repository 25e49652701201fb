//! The indicator capability contract and the helpers every formula shares.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Result alias used by every indicator operation.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// Failures surfaced while validating or calculating an indicator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// A configured window length is less than one.
    #[error("{indicator}: length must be at least 1")]
    InvalidLength {
        /// Indicator that rejected its length.
        indicator: &'static str,
    },
    /// A categorical parameter holds an unrecognized value.
    #[error("{indicator}: invalid {parameter} `{value}`")]
    InvalidType {
        /// Indicator owning the parameter.
        indicator: &'static str,
        /// Name of the categorical parameter.
        parameter: &'static str,
        /// The rejected value.
        value: String,
    },
    /// A required embedded indicator is absent, or a descriptor names an unknown kind.
    #[error("{indicator}: indicator is not set")]
    IndicatorNotSet {
        /// Indicator (or descriptor tag) missing its embedded member.
        indicator: String,
    },
    /// The price history is shorter than the indicator requires.
    #[error("invalid candle count: need {required}, got {actual}")]
    InvalidCandleCount {
        /// Samples required by `Indicator::count`.
        required: usize,
        /// Samples supplied by the caller.
        actual: usize,
    },
    /// Intermediate arithmetic left the range representable by [`Decimal`].
    #[error("{indicator}: arithmetic overflow")]
    Overflow {
        /// Indicator whose calculation overflowed.
        indicator: &'static str,
    },
}

impl IndicatorError {
    pub(crate) fn invalid_length(indicator: &'static str) -> Self {
        Self::InvalidLength { indicator }
    }

    /// Convenience constructor for [`IndicatorError::IndicatorNotSet`].
    pub fn not_set(indicator: impl Into<String>) -> Self {
        Self::IndicatorNotSet {
            indicator: indicator.into(),
        }
    }
}

/// Uniform contract implemented by every simple and composite indicator.
///
/// Implementations are immutable descriptors: they hold parameters only and
/// recompute from scratch on every `calc`, so a single value may be shared
/// across threads and reused with many price histories.
pub trait Indicator: fmt::Debug + Send + Sync {
    /// Checks the configuration (recursively for composites) without touching price data.
    fn validate(&self) -> IndicatorResult<()>;

    /// Calculates the indicator over the most recent `count()` prices.
    ///
    /// Prices are ordered oldest first. The configuration is validated before
    /// any arithmetic happens.
    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal>;

    /// Minimum number of trailing prices required, derived from configuration only.
    fn count(&self) -> usize;
}

impl<T> Indicator for Box<T>
where
    T: Indicator + ?Sized,
{
    fn validate(&self) -> IndicatorResult<()> {
        (**self).validate()
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        (**self).calc(prices)
    }

    fn count(&self) -> usize {
        (**self).count()
    }
}

/// Returns the last `count` prices, preserving order.
///
/// This is the admission gate shared by all formulas: a history shorter than
/// `count` fails with [`IndicatorError::InvalidCandleCount`]. A `count` of zero
/// yields an empty window.
pub fn resize(prices: &[Decimal], count: usize) -> IndicatorResult<&[Decimal]> {
    if prices.len() < count {
        return Err(IndicatorError::InvalidCandleCount {
            required: count,
            actual: prices.len(),
        });
    }
    Ok(&prices[prices.len() - count..])
}

/// Mean absolute deviation of `values` around their arithmetic mean.
///
/// Returns zero for an empty slice and `None` when the sum of the values or of
/// their deviations does not fit in a [`Decimal`].
pub fn mean_deviation(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return Some(Decimal::ZERO);
    }
    let divisor = decimal_from_usize(values.len());
    let mean = checked_sum(values.iter().copied())?.checked_div(divisor)?;
    let deviations = values
        .iter()
        .map(|value| value.checked_sub(mean).map(|diff| diff.abs()))
        .collect::<Option<Vec<_>>>()?;
    checked_sum(deviations)?.checked_div(divisor)
}

/// Adds `values`, returning `None` on overflow.
pub(crate) fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
}

/// Turns the `None` of a `checked_*` decimal operation into [`IndicatorError::Overflow`].
pub(crate) trait OrOverflow {
    fn or_overflow(self, indicator: &'static str) -> IndicatorResult<Decimal>;
}

impl OrOverflow for Option<Decimal> {
    fn or_overflow(self, indicator: &'static str) -> IndicatorResult<Decimal> {
        self.ok_or(IndicatorError::Overflow { indicator })
    }
}

/// Converts a length or index into a decimal.
pub fn decimal_from_usize(value: usize) -> Decimal {
    Decimal::from(value)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn series(values: &[&str]) -> Vec<Decimal> {
        values.iter().map(|value| dec(value)).collect()
    }

    #[test]
    fn resize_keeps_most_recent_prices() {
        let prices = series(&["1", "2", "3", "4"]);
        assert_eq!(resize(&prices, 2).unwrap(), &series(&["3", "4"])[..]);
        assert_eq!(resize(&prices, 4).unwrap(), &prices[..]);
    }

    #[test]
    fn resize_rejects_short_history() {
        let prices = series(&["1", "2"]);
        assert_eq!(
            resize(&prices, 3),
            Err(IndicatorError::InvalidCandleCount {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn resize_to_zero_is_empty() {
        let prices = series(&["1"]);
        assert!(resize(&prices, 0).unwrap().is_empty());
        assert!(resize(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn mean_deviation_averages_absolute_distance() {
        let prices = series(&["2", "4", "6", "8"]);
        assert_eq!(mean_deviation(&prices), Some(dec("2")));
        assert_eq!(mean_deviation(&series(&["5", "5"])), Some(Decimal::ZERO));
        assert_eq!(mean_deviation(&[]), Some(Decimal::ZERO));
    }

    #[test]
    fn mean_deviation_reports_overflow() {
        assert_eq!(mean_deviation(&[Decimal::MAX, Decimal::MAX]), None);
        assert_eq!(mean_deviation(&[Decimal::MAX, Decimal::MIN]), None);
    }

    #[test]
    fn overflow_maps_to_typed_error() {
        assert_eq!(
            Decimal::MAX.checked_add(Decimal::ONE).or_overflow("SMA"),
            Err(IndicatorError::Overflow { indicator: "SMA" })
        );
        assert_eq!(checked_sum([dec("1"), dec("2")]).or_overflow("SMA"), Ok(dec("3")));
    }

    #[test]
    fn boxed_indicators_delegate() {
        #[derive(Debug)]
        struct Last;

        impl Indicator for Last {
            fn validate(&self) -> IndicatorResult<()> {
                Ok(())
            }

            fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
                Ok(resize(prices, self.count())?[0])
            }

            fn count(&self) -> usize {
                1
            }
        }

        let boxed: Box<dyn Indicator> = Box::new(Last);
        assert_eq!(boxed.count(), 1);
        assert_eq!(boxed.calc(&series(&["1", "7"])).unwrap(), dec("7"));
        assert!(boxed.validate().is_ok());
    }

    #[test]
    fn errors_render_context() {
        assert_eq!(
            IndicatorError::invalid_length("SMA").to_string(),
            "SMA: length must be at least 1"
        );
        assert_eq!(
            IndicatorError::InvalidCandleCount {
                required: 3,
                actual: 1
            }
            .to_string(),
            "invalid candle count: need 3, got 1"
        );
    }
}
