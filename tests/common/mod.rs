//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use plaid_webhook_service::{
    app_state::AppState,
    backend::{BackendError, FinanceBackend},
    create_router,
    models::webhook::{AddTransactions, RemoveTransactions},
};
use tower::ServiceExt;

/// A backend call as observed by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AddHistorical(AddTransactions),
    Add(AddTransactions),
    Remove(RemoveTransactions),
}

/// Fake finances backend that records every call.
///
/// By default the add procedures report exactly the expected count.
#[derive(Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<Call>>,
    reported_count: Option<i64>,
    failure: Option<tonic::Code>,
    latency: Option<Duration>,
}

impl RecordingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Add procedures report `count` new transactions whatever was expected.
    pub fn reporting(count: i64) -> Arc<Self> {
        Arc::new(Self {
            reported_count: Some(count),
            ..Self::default()
        })
    }

    /// Every call fails with `code`.
    pub fn failing(code: tonic::Code) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(code),
            ..Self::default()
        })
    }

    /// Every call takes `latency` before it is recorded and answered.
    pub fn slow(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            latency: Some(latency),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) -> Result<(), BackendError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.calls.lock().unwrap().push(call);

        match self.failure {
            Some(code) => Err(BackendError::Rpc(tonic::Status::new(code, "fake failure"))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FinanceBackend for RecordingBackend {
    async fn add_historical_financial_transactions(
        &self,
        request: AddTransactions,
    ) -> Result<i64, BackendError> {
        let expected = request.expected_count;
        self.record(Call::AddHistorical(request)).await?;
        Ok(self.reported_count.unwrap_or(expected))
    }

    async fn add_financial_transactions(
        &self,
        request: AddTransactions,
    ) -> Result<i64, BackendError> {
        let expected = request.expected_count;
        self.record(Call::Add(request)).await?;
        Ok(self.reported_count.unwrap_or(expected))
    }

    async fn remove_financial_transactions(
        &self,
        request: RemoveTransactions,
    ) -> Result<(), BackendError> {
        self.record(Call::Remove(request)).await
    }
}

/// Router wired to `backend`.
pub fn app(backend: Arc<RecordingBackend>) -> Router {
    create_router(AppState::new(backend, "test"))
}

/// POST `body` to `uri` and return the response.
pub async fn post(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    app.oneshot(request).await.expect("failed to make request")
}

/// POST a JSON value to `uri` and return the response.
pub async fn post_json(app: Router, uri: &str, payload: serde_json::Value) -> Response<Body> {
    post(app, uri, serde_json::to_vec(&payload).expect("serialize payload")).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec()
}
