use std::process::ExitCode;

use nexttick_core::QueryOrchestrator;

use crate::cli::Cli;
use crate::error::{CliError, QUERY_FAILED_EXIT_CODE};
use crate::output::{self, QueryView};

pub async fn run(
    cli: &Cli,
    orchestrator: &QueryOrchestrator,
    raw_ticker: &str,
) -> Result<ExitCode, CliError> {
    let report = orchestrator.run_query(raw_ticker).await?;
    let snapshot = orchestrator.state().snapshot().await;
    let view = QueryView::new(&report, &snapshot, cli.window);

    output::render(&view, cli.format, cli.pretty)?;

    if report.is_committed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(QUERY_FAILED_EXIT_CODE))
    }
}
