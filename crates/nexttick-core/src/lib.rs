//! # NextTick Core
//!
//! Domain types and query orchestration for the NextTick prediction dashboard.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Prediction-service client configuration |
//! | [`domain`] | Ticker, dates, price points, reasoning, chart entries |
//! | [`envelope`] | JSON response envelope |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`merge`] | Chart series merger |
//! | [`orchestrator`] | Fetch-join-commit query workflow |
//! | [`presenter`] | Reasoning presenter |
//! | [`retry`] | Retry and backoff policy |
//! | [`service`] | Prediction-service contract and HTTP implementation |
//! | [`state`] | Dashboard state container |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │ ticker
//!          ▼
//! ┌─────────────────┐     ┌──────────────────────┐
//! │ Orchestrator    │────▶│ PredictionService    │── /stock, /predict, /reasoning
//! └────────┬────────┘     └──────────────────────┘
//!          │ commit(ticket, result)
//!          ▼
//! ┌─────────────────┐     ┌──────────────────────┐
//! │ DashboardState  │────▶│ merge_series/present │── chart, table, text
//! └─────────────────┘     └──────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use nexttick_core::{ClientConfig, HttpPredictionService, QueryOrchestrator, DEFAULT_WINDOW};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = HttpPredictionService::new(ClientConfig::from_env()?);
//!     let orchestrator = QueryOrchestrator::new(Arc::new(service));
//!
//!     orchestrator.run_query("aapl").await?;
//!     let snapshot = orchestrator.state().snapshot().await;
//!     for entry in snapshot.chart_series(DEFAULT_WINDOW) {
//!         println!("{} {:.2}", entry.date, entry.value());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod merge;
pub mod orchestrator;
pub mod presenter;
pub mod retry;
pub mod service;
pub mod state;

pub use config::{ClientConfig, DEFAULT_API_BASE_URL};
pub use domain::{
    ChartSeriesEntry, HistoricalPoint, PredictionPoint, Reasoning, Ticker, TradingDate,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::ValidationError;
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use merge::{merge_series, DEFAULT_WINDOW};
pub use orchestrator::{fetch_all, QueryOrchestrator, QueryOutcome, QueryReport};
pub use presenter::present;
pub use retry::{Backoff, RetryConfig};
pub use service::{
    Endpoint, HttpPredictionService, PredictionService, ServiceError, ServiceErrorKind,
    ServiceFuture,
};
pub use state::{DashboardSnapshot, DashboardState, QueryResult, QueryStatus, QueryTicket};
