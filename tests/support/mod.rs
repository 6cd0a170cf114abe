//! Shared fakes for behaviour tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use nexttick_core::{
    Endpoint, HistoricalPoint, HttpClient, HttpError, HttpRequest, HttpResponse, PredictionPoint,
    PredictionService, QueryResult, Reasoning, ServiceError, ServiceFuture, Ticker, TradingDate,
};
use tokio::sync::Notify;

pub const BASE_URL: &str = "http://predict.test:8000";

pub fn date(value: &str) -> TradingDate {
    TradingDate::parse(value).expect("valid date")
}

pub fn historical(date_str: &str, close: f64) -> HistoricalPoint {
    HistoricalPoint::new(date(date_str), close).expect("valid historical point")
}

pub fn predicted(date_str: &str, close: f64) -> PredictionPoint {
    PredictionPoint::new(date(date_str), close).expect("valid prediction point")
}

/// `count` consecutive January 2024 closes starting at `first_close`.
pub fn historical_days(count: usize, first_close: f64) -> Vec<HistoricalPoint> {
    (0..count)
        .map(|i| historical(&format!("2024-01-{:02}", i + 1), first_close + i as f64))
        .collect()
}

/// `count` consecutive February 2024 predicted closes starting at `first_close`.
pub fn predicted_days(count: usize, first_close: f64) -> Vec<PredictionPoint> {
    (0..count)
        .map(|i| predicted(&format!("2024-02-{:02}", i + 1), first_close + i as f64))
        .collect()
}

/// Deterministic query result whose prices are derived from `seed`.
pub fn sample_result(seed: f64) -> QueryResult {
    QueryResult {
        historical: historical_days(10, seed),
        prediction: predicted_days(7, seed + 100.0),
        reasoning: Reasoning::new(format!("reasoning for seed {seed}")),
    }
}

/// In-memory [`PredictionService`] with per-ticker data, failure injection
/// and an optional gate that holds historical requests for one ticker.
#[derive(Default)]
pub struct FakeService {
    data: HashMap<String, QueryResult>,
    failures: HashMap<Endpoint, ServiceError>,
    gate: Option<(String, Arc<Notify>)>,
    calls: Mutex<Vec<(Endpoint, String)>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticker(mut self, ticker: &str, result: QueryResult) -> Self {
        self.data.insert(ticker.to_owned(), result);
        self
    }

    pub fn failing(mut self, error: ServiceError) -> Self {
        self.failures.insert(error.endpoint(), error);
        self
    }

    pub fn gated(mut self, ticker: &str, gate: Arc<Notify>) -> Self {
        self.gate = Some((ticker.to_owned(), gate));
        self
    }

    pub fn calls(&self) -> Vec<(Endpoint, String)> {
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .clone()
    }

    fn lookup(&self, endpoint: Endpoint, ticker: &Ticker) -> Result<QueryResult, ServiceError> {
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .push((endpoint, ticker.as_str().to_owned()));

        if let Some(error) = self.failures.get(&endpoint) {
            return Err(error.clone());
        }

        self.data.get(ticker.as_str()).cloned().ok_or_else(|| {
            ServiceError::status(
                endpoint,
                404,
                Some(String::from("No data found for the given symbol and period.")),
                false,
            )
        })
    }
}

impl PredictionService for FakeService {
    fn historical<'a>(&'a self, ticker: &'a Ticker) -> ServiceFuture<'a, Vec<HistoricalPoint>> {
        Box::pin(async move {
            if let Some((gated, gate)) = &self.gate {
                if gated == ticker.as_str() {
                    gate.notified().await;
                }
            }
            self.lookup(Endpoint::Historical, ticker)
                .map(|result| result.historical)
        })
    }

    fn prediction<'a>(&'a self, ticker: &'a Ticker) -> ServiceFuture<'a, Vec<PredictionPoint>> {
        Box::pin(async move {
            self.lookup(Endpoint::Prediction, ticker)
                .map(|result| result.prediction)
        })
    }

    fn reasoning<'a>(&'a self, ticker: &'a Ticker) -> ServiceFuture<'a, Reasoning> {
        Box::pin(async move {
            self.lookup(Endpoint::Reasoning, ticker)
                .map(|result| result.reasoning)
        })
    }
}

type Responder = dyn Fn(&str, usize) -> Result<HttpResponse, HttpError> + Send + Sync;

/// [`HttpClient`] that records every request and answers through a closure
/// receiving the URL and how many times that URL was requested before.
pub struct ScriptedHttpClient {
    respond: Box<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str, usize) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serves well-formed bodies for every endpoint.
    pub fn healthy() -> Self {
        Self::new(|url, _| Ok(HttpResponse::ok_json(healthy_body(url))))
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }

    pub fn recorded_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self
            .recorded_requests()
            .into_iter()
            .map(|request| request.url)
            .collect();
        urls.sort();
        urls
    }

    pub fn count_for(&self, fragment: &str) -> usize {
        self.recorded_requests()
            .iter()
            .filter(|request| request.url.contains(fragment))
            .count()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let mut requests = self
            .requests
            .lock()
            .expect("request store should not be poisoned");
        let previous = requests.iter().filter(|r| r.url == request.url).count();
        let response = (self.respond)(&request.url, previous);
        requests.push(request);
        drop(requests);
        Box::pin(async move { response })
    }
}

pub const HISTORICAL_BODY: &str = r#"[
    {"Date":"2024-01-02 00:00:00-05:00","Open":184.2,"High":186.1,"Low":183.9,"Close":185.64,"Volume":82488700},
    {"Date":"2024-01-03 00:00:00-05:00","Open":183.9,"High":185.8,"Low":183.4,"Close":184.25,"Volume":58414500}
]"#;

pub const PREDICTION_BODY: &str = r#"[
    {"date":"2024-01-04","predicted_close":186.1},
    {"date":"2024-01-05","predicted_close":187.3}
]"#;

pub const REASONING_BODY: &str = r#"{"reasoning":"Short-term trend is mildly bullish."}"#;

pub fn healthy_body(url: &str) -> &'static str {
    if url.contains("/stock/") {
        HISTORICAL_BODY
    } else if url.contains("/predict/") {
        PREDICTION_BODY
    } else {
        REASONING_BODY
    }
}
