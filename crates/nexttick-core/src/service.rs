//! Prediction-service contract and its HTTP implementation.
//!
//! # Endpoints
//!
//! | Endpoint | Path | Response |
//! |----------|------|----------|
//! | Historical | `/stock/{ticker}` | `[{"Date": .., "Close": .., ..}]` |
//! | Prediction | `/predict/{ticker}` | `[{"date": .., "predicted_close": ..}]` |
//! | Reasoning | `/reasoning/{ticker}` | `{"reasoning": ..}` |
//!
//! Error responses carry a `{"detail": ..}` body which is surfaced in
//! [`ServiceError::message`].

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{HistoricalPoint, PredictionPoint, Reasoning, Ticker, TradingDate, ValidationError};

/// Remote resource fetched for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Historical,
    Prediction,
    Reasoning,
}

impl Endpoint {
    pub const ALL: [Self; 3] = [Self::Historical, Self::Prediction, Self::Reasoning];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::Prediction => "prediction",
            Self::Reasoning => "reasoning",
        }
    }

    pub const fn path_prefix(self) -> &'static str {
        match self {
            Self::Historical => "stock",
            Self::Prediction => "predict",
            Self::Reasoning => "reasoning",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure classification for a service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// The request never produced a response (connect, timeout, IO).
    Transport,
    /// The service answered with a non-2xx status.
    Status,
    /// The body did not have the expected shape.
    Decode,
}

/// Structured service error surfaced to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    kind: ServiceErrorKind,
    endpoint: Endpoint,
    status: Option<u16>,
    message: String,
    retryable: bool,
}

impl ServiceError {
    pub fn transport(endpoint: Endpoint, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind: ServiceErrorKind::Transport,
            endpoint,
            status: None,
            message: message.into(),
            retryable,
        }
    }

    pub fn status(endpoint: Endpoint, status: u16, detail: Option<String>, retryable: bool) -> Self {
        let message = match detail {
            Some(detail) => format!("service returned status {status}: {detail}"),
            None => format!("service returned status {status}"),
        };

        Self {
            kind: ServiceErrorKind::Status,
            endpoint,
            status: Some(status),
            message,
            retryable,
        }
    }

    pub fn decode(endpoint: Endpoint, message: impl Into<String>) -> Self {
        Self {
            kind: ServiceErrorKind::Decode,
            endpoint,
            status: None,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> ServiceErrorKind {
        self.kind
    }

    pub const fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub const fn http_status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ServiceErrorKind::Transport => "service.transport",
            ServiceErrorKind::Status => "service.status",
            ServiceErrorKind::Decode => "service.decode",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} request failed: {} ({})", self.endpoint, self.message, self.code())
    }
}

impl std::error::Error for ServiceError {}

pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ServiceError>> + Send + 'a>>;

/// The three remote resources a query needs.
pub trait PredictionService: Send + Sync {
    fn historical<'a>(&'a self, ticker: &'a Ticker) -> ServiceFuture<'a, Vec<HistoricalPoint>>;

    fn prediction<'a>(&'a self, ticker: &'a Ticker) -> ServiceFuture<'a, Vec<PredictionPoint>>;

    fn reasoning<'a>(&'a self, ticker: &'a Ticker) -> ServiceFuture<'a, Reasoning>;
}

/// [`PredictionService`] over an [`HttpClient`] transport.
#[derive(Clone)]
pub struct HttpPredictionService {
    http_client: Arc<dyn HttpClient>,
    config: ClientConfig,
}

impl HttpPredictionService {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: ClientConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint_url(&self, endpoint: Endpoint, ticker: &Ticker) -> String {
        format!(
            "{}/{}/{}",
            self.config.normalized_base_url(),
            endpoint.path_prefix(),
            ticker.path_segment()
        )
    }

    async fn fetch_json<T>(&self, endpoint: Endpoint, ticker: &Ticker) -> Result<T, ServiceError>
    where
        T: DeserializeOwned,
    {
        let body = self.fetch_with_retry(endpoint, ticker).await?;
        serde_json::from_str(&body).map_err(|error| {
            ServiceError::decode(endpoint, format!("unexpected response body: {error}"))
        })
    }

    async fn fetch_with_retry(
        &self,
        endpoint: Endpoint,
        ticker: &Ticker,
    ) -> Result<String, ServiceError> {
        let url = self.endpoint_url(endpoint, ticker);
        let retry = &self.config.retry;
        let mut attempt = 0;

        loop {
            let request = HttpRequest::get(url.as_str())
                .with_header("accept", "application/json")
                .with_timeout_ms(self.config.timeout_ms);

            tracing::debug!(%endpoint, %url, attempt, "requesting");

            let error = match self.http_client.execute(request).await {
                Ok(response) if response.is_success() => return Ok(response.body),
                Ok(response) => ServiceError::status(
                    endpoint,
                    response.status,
                    error_detail(&response.body),
                    retry.should_retry_status(response.status),
                ),
                Err(error) => ServiceError::transport(endpoint, error.message(), error.retryable()),
            };

            if !error.retryable() || attempt >= retry.max_retries {
                return Err(error);
            }

            let delay = retry.delay_for_attempt(attempt);
            tracing::warn!(
                %endpoint,
                %url,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "retrying prediction service call"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl PredictionService for HttpPredictionService {
    fn historical<'a>(&'a self, ticker: &'a Ticker) -> ServiceFuture<'a, Vec<HistoricalPoint>> {
        Box::pin(async move {
            let payload: Vec<HistoricalPayload> =
                self.fetch_json(Endpoint::Historical, ticker).await?;
            payload
                .into_iter()
                .map(normalize_historical)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|error| validation_to_error(Endpoint::Historical, error))
        })
    }

    fn prediction<'a>(&'a self, ticker: &'a Ticker) -> ServiceFuture<'a, Vec<PredictionPoint>> {
        Box::pin(async move {
            let payload: Vec<PredictionPayload> =
                self.fetch_json(Endpoint::Prediction, ticker).await?;
            payload
                .into_iter()
                .map(normalize_prediction)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|error| validation_to_error(Endpoint::Prediction, error))
        })
    }

    fn reasoning<'a>(&'a self, ticker: &'a Ticker) -> ServiceFuture<'a, Reasoning> {
        Box::pin(async move { self.fetch_json(Endpoint::Reasoning, ticker).await })
    }
}

#[derive(Debug, Deserialize)]
struct HistoricalPayload {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: f64,
}

#[derive(Debug, Deserialize)]
struct PredictionPayload {
    date: String,
    predicted_close: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    detail: Option<serde_json::Value>,
}

fn normalize_historical(payload: HistoricalPayload) -> Result<HistoricalPoint, ValidationError> {
    HistoricalPoint::new(TradingDate::parse(&payload.date)?, payload.close)
}

fn normalize_prediction(payload: PredictionPayload) -> Result<PredictionPoint, ValidationError> {
    PredictionPoint::new(TradingDate::parse(&payload.date)?, payload.predicted_close)
}

fn error_detail(body: &str) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_str(body).ok()?;
    match payload.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn validation_to_error(endpoint: Endpoint, error: ValidationError) -> ServiceError {
    ServiceError::decode(endpoint, error.to_string())
}
