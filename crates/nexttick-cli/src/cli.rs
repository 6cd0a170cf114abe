//! CLI argument definitions for NextTick.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `query` | Load history, prediction and reasoning for one ticker |
//! | `interactive` | Prompt for tickers until `quit` or end of input |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--api-base-url` | `$NEXTTICK_API_BASE_URL` or `http://127.0.0.1:8000` | Prediction service address |
//! | `--timeout-ms` | `$NEXTTICK_TIMEOUT_MS` or `60000` | Per-request timeout |
//! | `--retries` | `2` | Retries for transient failures |
//! | `--window` | `7` | Historical days shown in the chart |
//!
//! # Examples
//!
//! ```bash
//! nexttick query aapl
//! nexttick query msft --format json --pretty
//! nexttick --api-base-url http://10.0.0.5:8000 interactive
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use nexttick_core::DEFAULT_WINDOW;

/// NextTick - 7-day stock price predictions in your terminal
#[derive(Debug, Parser)]
#[command(
    name = "nexttick",
    author,
    version,
    about = "Stock history, 7-day prediction and reasoning in the terminal"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Prediction service base URL.
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Retries for transient failures (connection errors, 429, 502, 503, 504).
    #[arg(long, global = true, default_value_t = 2)]
    pub retries: u32,

    /// Number of trailing historical days shown next to the prediction.
    #[arg(long, global = true, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Log debug diagnostics to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load and display one ticker.
    Query(QueryArgs),
    /// Read tickers from stdin, one per line.
    Interactive,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Ticker symbol, case-insensitive (e.g. aapl).
    pub ticker: String,
}
