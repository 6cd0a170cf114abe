//! # Domain Models
//!
//! Canonical domain types for one NextTick query.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Normalized (uppercased) ticker symbol |
//! | [`TradingDate`] | Calendar date of a price point |
//! | [`HistoricalPoint`] | Observed close for one day |
//! | [`PredictionPoint`] | Predicted close for one future day |
//! | [`Reasoning`] | Optional free-text rationale |
//! | [`ChartSeriesEntry`] | One row of the merged chart series |
//!
//! Prices are validated at construction time: they must be finite and
//! non-negative.

mod models;
mod ticker;
mod trading_date;

pub use models::{ChartSeriesEntry, HistoricalPoint, PredictionPoint, Reasoning};
pub use ticker::Ticker;
pub use trading_date::TradingDate;
