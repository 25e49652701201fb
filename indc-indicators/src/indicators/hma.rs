//! Hull Moving Average (HMA).

use rust_decimal::Decimal;

use crate::core::{resize, Indicator, IndicatorError, IndicatorResult, OrOverflow};
use crate::indicators::wma::Wma;

/// Hull moving average built from a base WMA of length `L`.
///
/// For each of the last `floor(sqrt(L))` prices the raw hull value
/// `2 * WMA(L / 2) - WMA(L)` is taken over the history ending at that price;
/// the result is a `WMA(floor(sqrt(L)))` over those raw values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hma {
    /// Base moving average; `None` is an unconfigured HMA.
    pub wma: Option<Wma>,
}

impl Hma {
    /// Creates an HMA on top of `wma`.
    pub fn new(wma: Wma) -> Self {
        Self { wma: Some(wma) }
    }

    /// Shorthand for an HMA over a base WMA of `length` prices.
    pub fn with_length(length: usize) -> Self {
        Self::new(Wma::new(length))
    }

    fn base(&self) -> IndicatorResult<Wma> {
        self.wma.ok_or_else(|| IndicatorError::not_set("HMA"))
    }
}

impl Indicator for Hma {
    fn validate(&self) -> IndicatorResult<()> {
        self.base()?.validate()
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        self.validate()?;
        let window = resize(prices, self.count())?;
        let base = self.base()?;
        let hull_length = base.count().isqrt();
        let half = Wma::new((base.count() / 2).max(1));

        let mut raw = Vec::with_capacity(hull_length);
        for idx in 0..hull_length {
            let history = &window[..window.len() - hull_length + idx + 1];
            let fast = half.calc(history)?;
            let slow = base.calc(history)?;
            let value = fast
                .checked_mul(Decimal::TWO)
                .and_then(|doubled| doubled.checked_sub(slow))
                .or_overflow("HMA")?;
            raw.push(value);
        }

        tracing::trace!(hull_length, "folding raw hull series");
        Wma::new(hull_length).calc(&raw)
    }

    fn count(&self) -> usize {
        self.wma
            .map(|wma| wma.count().saturating_mul(2).saturating_sub(1))
            .unwrap_or_default()
    }
}
