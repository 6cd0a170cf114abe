mod chart;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use nexttick_core::{
    ChartSeriesEntry, DashboardSnapshot, Envelope, EnvelopeError, HistoricalPoint,
    PredictionPoint, QueryOutcome, QueryReport, QueryStatus, Ticker,
};
use serde::Serialize;
use serde_json::Value;

use self::chart::render_chart;
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::metadata::Metadata;

const PREDICTION_HEADING: &str = "7-Day Stock Price Prediction";
const REASONING_HEADING: &str = "Reasoning Behind Prediction";
const STALE_WARNING: &str = "result superseded by a newer query";

/// One finished query and the dashboard it left behind.
pub struct QueryView<'a> {
    pub report: &'a QueryReport,
    pub snapshot: &'a DashboardSnapshot,
    pub window: usize,
}

impl<'a> QueryView<'a> {
    pub fn new(report: &'a QueryReport, snapshot: &'a DashboardSnapshot, window: usize) -> Self {
        Self {
            report,
            snapshot,
            window,
        }
    }
}

/// JSON payload of a query envelope.
#[derive(Debug, Serialize)]
struct DashboardData<'a> {
    ticker: Option<&'a Ticker>,
    status: &'a QueryStatus,
    historical: &'a [HistoricalPoint],
    prediction: &'a [PredictionPoint],
    reasoning: Option<&'a str>,
    chart: Vec<ChartSeriesEntry>,
}

pub fn render(view: &QueryView<'_>, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let envelope = build_envelope(view)?;
            let payload = if pretty {
                serde_json::to_string_pretty(&envelope)?
            } else {
                serde_json::to_string(&envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => print!("{}", render_table(view)),
    }

    Ok(())
}

fn build_envelope(view: &QueryView<'_>) -> Result<Envelope<Value>, CliError> {
    let snapshot = view.snapshot;
    let mut metadata = Metadata::new(view.report.ticker().clone(), view.report.latency_ms);

    let errors = match &view.report.outcome {
        QueryOutcome::Committed(_) => Vec::new(),
        QueryOutcome::Failed(error) => vec![EnvelopeError::from(error)],
        QueryOutcome::Stale => {
            metadata.push_warning(STALE_WARNING);
            Vec::new()
        }
    };

    let data = serde_json::to_value(DashboardData {
        ticker: snapshot.ticker.as_ref(),
        status: &snapshot.status,
        historical: &snapshot.historical,
        prediction: &snapshot.prediction,
        reasoning: snapshot.reasoning_text(),
        chart: snapshot.chart_series(view.window),
    })?;

    Ok(Envelope::with_errors(
        metadata.into_envelope_meta()?,
        data,
        errors,
    )?)
}

fn render_table(view: &QueryView<'_>) -> String {
    let snapshot = view.snapshot;
    let mut rendered = String::new();

    match &view.report.outcome {
        QueryOutcome::Committed(_) => {}
        QueryOutcome::Failed(error) => {
            let prompt = snapshot.status.retry_prompt().unwrap_or_else(|| {
                format!(
                    "Could not load {}: {}",
                    view.report.ticker(),
                    error.message()
                )
            });
            rendered.push_str(&prompt);
            rendered.push('\n');
            if !snapshot.has_data() {
                return rendered;
            }
            rendered.push('\n');
        }
        QueryOutcome::Stale => {
            rendered.push_str(&format!(
                "Result for {} was {STALE_WARNING}.\n",
                view.report.ticker()
            ));
            return rendered;
        }
    }

    rendered.push_str(&render_dashboard(snapshot, view.window));
    rendered
}

/// Chart, prediction table and reasoning for the committed snapshot.
fn render_dashboard(snapshot: &DashboardSnapshot, window: usize) -> String {
    let mut rendered = String::new();

    if let Some(ticker) = &snapshot.ticker {
        rendered.push_str(&format!("{ticker}\n\n"));
    }

    rendered.push_str(&render_chart(&snapshot.chart_series(window)));

    if let Some(table) = prediction_table(&snapshot.prediction) {
        rendered.push_str(&format!("\n{PREDICTION_HEADING}\n{table}\n"));
    }

    if let Some(text) = snapshot.reasoning_text() {
        rendered.push_str(&format!("\n{REASONING_HEADING}\n{text}\n"));
    }

    rendered
}

fn prediction_table(prediction: &[PredictionPoint]) -> Option<Table> {
    if prediction.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Predicted Close"]);

    for point in prediction {
        table.add_row(vec![
            point.date.to_string(),
            format!("${:.2}", point.predicted_close),
        ]);
    }

    Some(table)
}
