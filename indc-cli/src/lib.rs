//! Command-line surface for `indc`.

pub mod app;
mod prices;
