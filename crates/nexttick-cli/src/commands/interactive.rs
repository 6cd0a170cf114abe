//! Ticker entry loop.

use std::io::Write;
use std::process::ExitCode;

use nexttick_core::{QueryOrchestrator, ValidationError};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{Cli, OutputFormat};
use crate::error::CliError;
use crate::output::{self, QueryView};

const PROMPT: &str = "ticker> ";

pub async fn run(cli: &Cli, orchestrator: &QueryOrchestrator) -> Result<ExitCode, CliError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let show_prompt = cli.format == OutputFormat::Table;

    loop {
        if show_prompt {
            let mut stdout = std::io::stdout();
            write!(stdout, "{PROMPT}")?;
            stdout.flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            LineAction::Skip => continue,
            LineAction::Quit => break,
            LineAction::Query(raw) => {
                let report = match orchestrator.run_query(raw).await {
                    Ok(report) => report,
                    Err(ValidationError::EmptyTicker) => continue,
                    Err(error) => return Err(error.into()),
                };
                let snapshot = orchestrator.state().snapshot().await;
                output::render(
                    &QueryView::new(&report, &snapshot, cli.window),
                    cli.format,
                    cli.pretty,
                )?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, PartialEq, Eq)]
enum LineAction<'a> {
    Skip,
    Quit,
    Query(&'a str),
}

fn parse_line(line: &str) -> LineAction<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineAction::Skip;
    }

    if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
        return LineAction::Quit;
    }

    LineAction::Query(trimmed)
}
