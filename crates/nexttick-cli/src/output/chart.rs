//! Horizontal bar chart of a merged price series.

use nexttick_core::ChartSeriesEntry;

const BAR_WIDTH: usize = 40;
const ACTUAL_MARK: char = '█';
const PREDICTED_MARK: char = '░';

/// Render one row per entry, scaled between the lowest and highest price.
pub fn render_chart(series: &[ChartSeriesEntry]) -> String {
    if series.is_empty() {
        return String::from("No chart data.\n");
    }

    let (min, max) = series
        .iter()
        .map(ChartSeriesEntry::value)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), value| {
            (low.min(value), high.max(value))
        });

    let mut rendered = format!("{ACTUAL_MARK} Actual   {PREDICTED_MARK} Predicted\n");
    for entry in series {
        let value = entry.value();
        let mark = if entry.is_predicted() {
            PREDICTED_MARK
        } else {
            ACTUAL_MARK
        };
        let bar: String = std::iter::repeat(mark)
            .take(bar_length(value, min, max))
            .collect();
        rendered.push_str(&format!(
            "{} │{bar:<width$} {value:>10.2}\n",
            entry.date,
            width = BAR_WIDTH
        ));
    }

    rendered
}

fn bar_length(value: f64, min: f64, max: f64) -> usize {
    let span = max - min;
    if span <= f64::EPSILON {
        return BAR_WIDTH;
    }

    let scaled = (value - min) / span * (BAR_WIDTH - 1) as f64;
    1 + scaled.round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexttick_core::TradingDate;

    fn date(value: &str) -> TradingDate {
        TradingDate::parse(value).expect("valid date")
    }

    fn bar_of(line: &str, mark: char) -> usize {
        line.chars().filter(|c| *c == mark).count()
    }

    #[test]
    fn empty_series_has_placeholder() {
        assert_eq!(render_chart(&[]), "No chart data.\n");
    }

    #[test]
    fn legend_and_marks_distinguish_actual_from_predicted() {
        let series = [
            ChartSeriesEntry::actual(date("2024-01-01"), 100.0),
            ChartSeriesEntry::predicted(date("2024-01-02"), 110.0),
        ];

        let chart = render_chart(&series);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Actual"));
        assert!(lines[0].contains("Predicted"));
        assert!(lines[1].starts_with("2024-01-01"));
        assert_eq!(bar_of(lines[1], PREDICTED_MARK), 0);
        assert_eq!(bar_of(lines[2], ACTUAL_MARK), 0);
        assert!(lines[2].ends_with("110.00"));
    }

    #[test]
    fn bars_scale_from_lowest_to_highest_price() {
        let series = [
            ChartSeriesEntry::actual(date("2024-01-01"), 50.0),
            ChartSeriesEntry::actual(date("2024-01-02"), 75.0),
            ChartSeriesEntry::actual(date("2024-01-03"), 100.0),
        ];

        let chart = render_chart(&series);
        let bars: Vec<usize> = chart
            .lines()
            .skip(1)
            .map(|line| bar_of(line, ACTUAL_MARK))
            .collect();

        assert_eq!(bars[0], 1);
        assert_eq!(bars[2], BAR_WIDTH);
        assert!(bars[0] < bars[1] && bars[1] < bars[2]);
    }

    #[test]
    fn flat_series_draws_full_bars() {
        assert_eq!(bar_length(5.0, 5.0, 5.0), BAR_WIDTH);
    }
}
