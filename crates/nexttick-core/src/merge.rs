//! Chart series assembly.

use crate::{ChartSeriesEntry, HistoricalPoint, PredictionPoint};

/// Number of trailing historical points shown next to the prediction.
pub const DEFAULT_WINDOW: usize = 7;

/// Concatenate the trailing `window` historical points with every prediction point.
///
/// Both sub-sequences keep their input order. Dates are neither sorted nor
/// deduplicated, so a date present in both inputs yields two rows. The
/// result has `min(window, historical.len()) + prediction.len()` entries.
pub fn merge_series(
    historical: &[HistoricalPoint],
    prediction: &[PredictionPoint],
    window: usize,
) -> Vec<ChartSeriesEntry> {
    let start = historical.len().saturating_sub(window);
    let trailing = &historical[start..];

    let mut series = Vec::with_capacity(trailing.len() + prediction.len());
    series.extend(
        trailing
            .iter()
            .map(|point| ChartSeriesEntry::actual(point.date, point.close)),
    );
    series.extend(
        prediction
            .iter()
            .map(|point| ChartSeriesEntry::predicted(point.date, point.predicted_close)),
    );
    series
}
