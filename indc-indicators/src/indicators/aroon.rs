//! Aroon up/down.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::core::{decimal_from_usize, resize, Indicator, IndicatorError, IndicatorResult};

/// Direction measured by [`Aroon`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Trend {
    /// Time since the highest price.
    #[default]
    Up,
    /// Time since the lowest price.
    Down,
}

impl Trend {
    /// Lowercase label used in descriptors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trend {
    type Err = IndicatorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(IndicatorError::InvalidType {
                indicator: "AROON",
                parameter: "trend",
                value: other.to_string(),
            }),
        }
    }
}

/// Percentage of the window elapsed since the most recent extreme.
///
/// Ties resolve to the newest sample: the running extreme is replaced whenever
/// a price equals it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aroon {
    /// Which extreme to track.
    pub trend: Trend,
    /// Number of prices in the window.
    pub length: usize,
}

impl Aroon {
    /// Creates an Aroon indicator for `trend` over `length` prices.
    pub fn new(trend: Trend, length: usize) -> Self {
        Self { trend, length }
    }

    fn is_new_extreme(&self, extreme: Decimal, price: Decimal) -> bool {
        match self.trend {
            Trend::Up => extreme <= price,
            Trend::Down => extreme >= price,
        }
    }
}

impl Indicator for Aroon {
    fn validate(&self) -> IndicatorResult<()> {
        if self.length < 1 {
            return Err(IndicatorError::invalid_length("AROON"));
        }
        Ok(())
    }

    fn calc(&self, prices: &[Decimal]) -> IndicatorResult<Decimal> {
        self.validate()?;
        let window = resize(prices, self.count())?;

        let mut extreme: Option<Decimal> = None;
        let mut distance = 0;
        for (idx, price) in window.iter().enumerate() {
            let replace = match extreme {
                Some(current) => self.is_new_extreme(current, *price),
                None => true,
            };
            if replace {
                extreme = Some(*price);
                distance = self.length - idx - 1;
            }
        }

        let length = decimal_from_usize(self.length);
        Ok((length - decimal_from_usize(distance)) * Decimal::from(100) / length)
    }

    fn count(&self) -> usize {
        self.length
    }
}
