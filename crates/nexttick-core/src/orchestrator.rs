//! Query orchestration: fetch, join, commit.

use std::sync::Arc;
use std::time::Instant;

use crate::service::{PredictionService, ServiceError};
use crate::state::{DashboardState, QueryResult, QueryTicket};
use crate::{Ticker, ValidationError};

/// What happened to one query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// All three resources arrived and were committed.
    Committed(QueryResult),
    /// A request failed; displayed data was left untouched.
    Failed(ServiceError),
    /// A newer query was started before this one finished; its result was dropped.
    Stale,
}

/// Outcome of a query together with timing information.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryReport {
    pub ticket: QueryTicket,
    pub latency_ms: u64,
    pub outcome: QueryOutcome,
}

impl QueryReport {
    pub fn ticker(&self) -> &Ticker {
        self.ticket.ticker()
    }

    pub fn is_committed(&self) -> bool {
        matches!(self.outcome, QueryOutcome::Committed(_))
    }
}

/// Runs ticker queries against a [`PredictionService`] and commits them to a
/// [`DashboardState`].
#[derive(Clone)]
pub struct QueryOrchestrator {
    service: Arc<dyn PredictionService>,
    state: DashboardState,
}

impl QueryOrchestrator {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self::with_state(service, DashboardState::new())
    }

    pub fn with_state(service: Arc<dyn PredictionService>, state: DashboardState) -> Self {
        Self { service, state }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Normalize `raw` and run a query for it.
    ///
    /// Blank input is rejected before anything is dispatched.
    pub async fn run_query(&self, raw: &str) -> Result<QueryReport, ValidationError> {
        let ticker = Ticker::parse(raw)?;
        Ok(self.run(ticker).await)
    }

    /// Run a query for an already normalized ticker.
    pub async fn run(&self, ticker: Ticker) -> QueryReport {
        let started = Instant::now();
        let ticket = self.state.begin(ticker).await;
        tracing::info!(
            ticker = %ticket.ticker(),
            generation = ticket.generation(),
            "query started"
        );

        let fetched = fetch_all(self.service.as_ref(), ticket.ticker()).await;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = match fetched {
            Ok(result) => {
                if self.state.commit(&ticket, result.clone()).await {
                    tracing::info!(
                        ticker = %ticket.ticker(),
                        historical = result.historical.len(),
                        prediction = result.prediction.len(),
                        latency_ms,
                        "query committed"
                    );
                    QueryOutcome::Committed(result)
                } else {
                    tracing::debug!(ticker = %ticket.ticker(), "discarding stale query result");
                    QueryOutcome::Stale
                }
            }
            Err(error) => {
                if self.state.fail(&ticket, error.message()).await {
                    tracing::warn!(
                        ticker = %ticket.ticker(),
                        endpoint = %error.endpoint(),
                        code = error.code(),
                        error = %error,
                        "query failed"
                    );
                    QueryOutcome::Failed(error)
                } else {
                    tracing::debug!(ticker = %ticket.ticker(), error = %error, "discarding stale query failure");
                    QueryOutcome::Stale
                }
            }
        };

        QueryReport {
            ticket,
            latency_ms,
            outcome,
        }
    }
}

/// Fetch the three resources concurrently; the first error aborts the join.
pub async fn fetch_all(
    service: &dyn PredictionService,
    ticker: &Ticker,
) -> Result<QueryResult, ServiceError> {
    let (historical, prediction, reasoning) = tokio::try_join!(
        service.historical(ticker),
        service.prediction(ticker),
        service.reasoning(ticker),
    )?;

    Ok(QueryResult {
        historical,
        prediction,
        reasoning,
    })
}
