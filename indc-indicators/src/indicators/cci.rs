//! Commodity Channel Index (CCI).

use rust_decimal::Decimal;

use crate::core::{
    mean_deviation, resize, Indicator, IndicatorError, IndicatorResult, OrOverflow,
};

/// Distance of the latest price from a moving average, normalized by mean deviation.
///
/// `(last - ma) / (0.015 * mean_deviation(window))`, where the window length
/// is the embedded indicator's own count. A window without dispersion yields zero.
#[derive(Debug, Default)]
pub struct Cci {
    /// Moving average the latest price is compared against.
    pub indicator: Option<Box<dyn Indicator>>,
}

impl Cci {
    /// Creates a CCI around the provided moving average.
    pub fn new(indicator: impl Indicator + 'static) -> Self {
        Self {
            indicator: Some(Box::new(indicator)),
        }
    }

    fn member(&self) -> IndicatorResult<&dyn Indicator> {
        self.indicator
            .as_deref()
            .ok_or_else(|| IndicatorError::not_set("CCI"))
    }

    fn scale() -> Decimal {
        Decimal::new(15, 3)
    }
}

impl Indicator for Cci {
    fn validate(&self) -> IndicatorResult<()> {
        self.member()?.validate()
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        self.validate()?;
        let window = resize(prices, self.count())?;
        let average = self.member()?.calc(window)?;

        let dispersion = mean_deviation(window).or_overflow("CCI")?;
        let denominator = Self::scale() * dispersion;
        if denominator.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let last = window[window.len() - 1];
        last.checked_sub(average)
            .and_then(|distance| distance.checked_div(denominator))
            .or_overflow("CCI")
    }

    fn count(&self) -> usize {
        self.indicator.as_ref().map_or(0, |ind| ind.count())
    }
}
