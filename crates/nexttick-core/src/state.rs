//! Dashboard state container.
//!
//! Holds the data of the last successful query plus the status of the most
//! recent one. Query results are applied through a single [`DashboardState::commit`]
//! call so readers never see fields from two different queries, and each
//! result is matched against the [`QueryTicket`] it was issued under so late
//! answers to superseded queries are dropped.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::merge::merge_series;
use crate::presenter::present;
use crate::{ChartSeriesEntry, HistoricalPoint, PredictionPoint, Reasoning, Ticker};

/// Tag identifying the query a result belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryTicket {
    generation: u64,
    ticker: Ticker,
}

impl QueryTicket {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }
}

/// The three fetched resources of one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub historical: Vec<HistoricalPoint>,
    pub prediction: Vec<PredictionPoint>,
    pub reasoning: Reasoning,
}

/// Lifecycle of the most recent query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QueryStatus {
    Idle,
    Loading { ticker: Ticker },
    Ready,
    Failed { ticker: Ticker, message: String },
}

impl QueryStatus {
    /// Text shown to the user when the last query failed.
    pub fn retry_prompt(&self) -> Option<String> {
        match self {
            Self::Failed { ticker, message } => Some(format!(
                "Could not load {ticker}: {message}. Check the ticker or the service and try again."
            )),
            _ => None,
        }
    }
}

/// Consistent copy of the dashboard state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub ticker: Option<Ticker>,
    pub historical: Vec<HistoricalPoint>,
    pub prediction: Vec<PredictionPoint>,
    pub reasoning: Reasoning,
    pub status: QueryStatus,
}

impl DashboardSnapshot {
    pub fn chart_series(&self, window: usize) -> Vec<ChartSeriesEntry> {
        merge_series(&self.historical, &self.prediction, window)
    }

    pub fn reasoning_text(&self) -> Option<&str> {
        present(&self.reasoning)
    }

    pub fn has_data(&self) -> bool {
        self.ticker.is_some()
    }
}

#[derive(Debug)]
struct StateInner {
    generation: u64,
    latest: Option<QueryTicket>,
    ticker: Option<Ticker>,
    historical: Vec<HistoricalPoint>,
    prediction: Vec<PredictionPoint>,
    reasoning: Reasoning,
    status: QueryStatus,
}

impl StateInner {
    fn is_current(&self, ticket: &QueryTicket) -> bool {
        self.latest.as_ref() == Some(ticket)
    }
}

/// Shared, cloneable handle to the dashboard state.
#[derive(Debug, Clone)]
pub struct DashboardState {
    inner: Arc<RwLock<StateInner>>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StateInner {
                generation: 0,
                latest: None,
                ticker: None,
                historical: Vec::new(),
                prediction: Vec::new(),
                reasoning: Reasoning::absent(),
                status: QueryStatus::Idle,
            })),
        }
    }

    /// Start a query for `ticker`, superseding any query still in flight.
    pub async fn begin(&self, ticker: Ticker) -> QueryTicket {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        let ticket = QueryTicket {
            generation: inner.generation,
            ticker: ticker.clone(),
        };
        inner.latest = Some(ticket.clone());
        inner.status = QueryStatus::Loading { ticker };
        ticket
    }

    /// Replace all data with `result`. Returns `false` and changes nothing if
    /// `ticket` has been superseded.
    pub async fn commit(&self, ticket: &QueryTicket, result: QueryResult) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.is_current(ticket) {
            return false;
        }

        let QueryResult {
            historical,
            prediction,
            reasoning,
        } = result;
        inner.ticker = Some(ticket.ticker.clone());
        inner.historical = historical;
        inner.prediction = prediction;
        inner.reasoning = reasoning;
        inner.status = QueryStatus::Ready;
        true
    }

    /// Record a failed query without touching the displayed data.
    pub async fn fail(&self, ticket: &QueryTicket, message: impl Into<String>) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.is_current(ticket) {
            return false;
        }

        inner.status = QueryStatus::Failed {
            ticker: ticket.ticker.clone(),
            message: message.into(),
        };
        true
    }

    pub async fn is_current(&self, ticket: &QueryTicket) -> bool {
        self.inner.read().await.is_current(ticket)
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let inner = self.inner.read().await;
        DashboardSnapshot {
            ticker: inner.ticker.clone(),
            historical: inner.historical.clone(),
            prediction: inner.prediction.clone(),
            reasoning: inner.reasoning.clone(),
            status: inner.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TradingDate;

    fn ticker(raw: &str) -> Ticker {
        Ticker::parse(raw).expect("valid ticker")
    }

    fn result(close: f64) -> QueryResult {
        let date = TradingDate::parse("2024-01-02").expect("valid date");
        QueryResult {
            historical: vec![HistoricalPoint::new(date, close).expect("valid point")],
            prediction: vec![PredictionPoint::new(date, close + 1.0).expect("valid point")],
            reasoning: Reasoning::new(format!("close {close}")),
        }
    }

    #[tokio::test]
    async fn starts_idle_and_empty() {
        let snapshot = DashboardState::new().snapshot().await;

        assert_eq!(snapshot.status, QueryStatus::Idle);
        assert!(!snapshot.has_data());
        assert!(snapshot.chart_series(7).is_empty());
        assert_eq!(snapshot.reasoning_text(), None);
    }

    #[tokio::test]
    async fn begin_marks_loading_and_advances_generation() {
        let state = DashboardState::new();

        let first = state.begin(ticker("aapl")).await;
        let second = state.begin(ticker("msft")).await;

        assert_eq!(second.generation(), first.generation() + 1);
        assert!(!state.is_current(&first).await);
        assert!(state.is_current(&second).await);
        assert_eq!(
            state.snapshot().await.status,
            QueryStatus::Loading {
                ticker: ticker("MSFT")
            }
        );
    }

    #[tokio::test]
    async fn commit_replaces_all_fields_together() {
        let state = DashboardState::new();
        let ticket = state.begin(ticker("aapl")).await;

        assert!(state.commit(&ticket, result(10.0)).await);

        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.ticker, Some(ticker("AAPL")));
        assert_eq!(snapshot.historical, result(10.0).historical);
        assert_eq!(snapshot.prediction, result(10.0).prediction);
        assert_eq!(snapshot.reasoning_text(), Some("close 10"));
        assert_eq!(snapshot.status, QueryStatus::Ready);
    }

    #[tokio::test]
    async fn superseded_ticket_cannot_commit_or_fail() {
        let state = DashboardState::new();
        let stale = state.begin(ticker("aapl")).await;
        let current = state.begin(ticker("msft")).await;

        assert!(!state.commit(&stale, result(1.0)).await);
        assert!(!state.fail(&stale, "boom").await);
        assert!(state.commit(&current, result(2.0)).await);

        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.ticker, Some(ticker("MSFT")));
        assert_eq!(snapshot.historical, result(2.0).historical);
    }

    #[tokio::test]
    async fn failure_keeps_data_and_prompts_retry() {
        let state = DashboardState::new();
        let ticket = state.begin(ticker("aapl")).await;
        state.commit(&ticket, result(5.0)).await;

        let failing = state.begin(ticker("nvda")).await;
        assert!(state.fail(&failing, "service returned status 500").await);

        let snapshot = state.snapshot().await;
        assert_eq!(snapshot.ticker, Some(ticker("AAPL")));
        assert_eq!(snapshot.historical, result(5.0).historical);
        assert_eq!(
            snapshot.status.retry_prompt().as_deref(),
            Some("Could not load NVDA: service returned status 500. Check the ticker or the service and try again.")
        );
    }
}
