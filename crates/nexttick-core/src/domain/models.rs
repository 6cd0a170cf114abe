use serde::{Deserialize, Serialize};

use crate::{TradingDate, ValidationError};

/// Observed closing price for one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: TradingDate,
    pub close: f64,
}

impl HistoricalPoint {
    pub fn new(date: TradingDate, close: f64) -> Result<Self, ValidationError> {
        validate_price("close", close)?;
        Ok(Self { date, close })
    }
}

/// Model output for one future trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub date: TradingDate,
    pub predicted_close: f64,
}

impl PredictionPoint {
    pub fn new(date: TradingDate, predicted_close: f64) -> Result<Self, ValidationError> {
        validate_price("predicted_close", predicted_close)?;
        Ok(Self {
            date,
            predicted_close,
        })
    }
}

/// Free-text rationale attached to a prediction.
///
/// `reasoning` is `None` when the service omitted the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reasoning {
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl Reasoning {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            reasoning: Some(text.into()),
        }
    }

    pub const fn absent() -> Self {
        Self { reasoning: None }
    }
}

/// One row of the chart series. Exactly one of the two prices is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartSeriesEntry {
    pub date: TradingDate,
    pub actual_close: Option<f64>,
    pub predicted_close: Option<f64>,
}

impl ChartSeriesEntry {
    pub const fn actual(date: TradingDate, close: f64) -> Self {
        Self {
            date,
            actual_close: Some(close),
            predicted_close: None,
        }
    }

    pub const fn predicted(date: TradingDate, predicted_close: f64) -> Self {
        Self {
            date,
            actual_close: None,
            predicted_close: Some(predicted_close),
        }
    }

    /// Whichever price the entry carries.
    pub fn value(&self) -> f64 {
        self.actual_close.or(self.predicted_close).unwrap_or_default()
    }

    pub const fn is_predicted(&self) -> bool {
        self.predicted_close.is_some()
    }
}

fn validate_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
