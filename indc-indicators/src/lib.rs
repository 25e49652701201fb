#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Composable technical indicators built on decimal arithmetic.

/// The indicator contract, windowing and dispersion helpers.
pub mod core;
/// Convenience wrappers such as `calc_rsi` and `count_ema`.
pub mod functions;
/// Built-in indicator implementations.
pub mod indicators;

/// Re-export of the core contract and error type to make the crate easy to consume.
pub use crate::core::{mean_deviation, resize, Indicator, IndicatorError, IndicatorResult};
