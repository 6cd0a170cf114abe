mod interactive;
mod query;

use std::process::ExitCode;
use std::sync::Arc;

use nexttick_core::config::{ENV_API_BASE_URL, ENV_TIMEOUT_MS};
use nexttick_core::{
    ClientConfig, HttpPredictionService, QueryOrchestrator, RetryConfig, ValidationError,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    if cli.window == 0 {
        return Err(ValidationError::ZeroWindow.into());
    }

    let config = resolve_config(cli, |key| std::env::var(key).ok())?;
    tracing::debug!(
        api_base_url = %config.normalized_base_url(),
        timeout_ms = config.timeout_ms,
        retries = config.retry.max_retries,
        "client configured"
    );
    let orchestrator = QueryOrchestrator::new(Arc::new(HttpPredictionService::new(config)));

    match &cli.command {
        Command::Query(args) => query::run(cli, &orchestrator, &args.ticker).await,
        Command::Interactive => interactive::run(cli, &orchestrator).await,
    }
}

/// Flags win over `NEXTTICK_*` variables, which win over defaults.
fn resolve_config<F>(cli: &Cli, env: F) -> Result<ClientConfig, ValidationError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = ClientConfig::from_lookup(|key| match key {
        ENV_API_BASE_URL => cli.api_base_url.clone().or_else(|| env(key)),
        ENV_TIMEOUT_MS => cli
            .timeout_ms
            .map(|timeout_ms| timeout_ms.to_string())
            .or_else(|| env(key)),
        _ => env(key),
    })?;

    Ok(config.with_retry(RetryConfig::exponential(cli.retries)))
}
