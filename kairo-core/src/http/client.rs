//! HTTP client trait and implementations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use url::Url;

use crate::error::FetchError;

use super::{REQUEST_TIMEOUT, USER_AGENT};

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET a URL and decode the body as JSON.
    ///
    /// Any status other than 200 is reported as `FetchError::Status`.
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, FetchError>;
}

/// Production HTTP client. No caching, no retries.
///
/// Every request carries the fixed registry user agent and times out after
/// `REQUEST_TIMEOUT`.
#[derive(Clone)]
pub struct ReqwestClient {
    /// reqwest client, cloned cheaply and shared for connection pooling.
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        tracing::debug!(url = %url, "network: fetching");
        let response = self.inner.get(url.clone()).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::debug!(url = %url, status = %status, "network: request failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::InvalidJson(e.to_string()))
    }
}

/// Mock response for testing.
#[derive(Clone, Debug)]
pub enum MockResponse {
    Json(serde_json::Value),
    Status(u16),
    Error(String),
}

/// Mock HTTP client for testing.
///
/// Responses are keyed by the full URL, query string included. Every
/// requested URL is recorded in order.
#[derive(Default)]
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
    requests: Mutex<Vec<String>>,
}

impl MockClient {
    /// Create a new empty mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for a URL.
    pub fn with_response(mut self, url: &Url, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Add a JSON body (status 200) for a URL.
    pub fn with_json(self, url: &Url, body: serde_json::Value) -> Self {
        self.with_response(url, MockResponse::Json(body))
    }

    /// Add a non-success status for a URL.
    pub fn with_status(self, url: &Url, status: u16) -> Self {
        self.with_response(url, MockResponse::Status(status))
    }

    /// Add a transport error for a URL.
    pub fn with_error(self, url: &Url, error: &str) -> Self {
        self.with_response(url, MockResponse::Error(error.to_string()))
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());

        match self.responses.get(url.as_str()) {
            Some(MockResponse::Json(body)) => Ok(body.clone()),
            Some(MockResponse::Status(status)) => Err(FetchError::Status(*status)),
            Some(MockResponse::Error(e)) => Err(FetchError::Transport(e.clone())),
            // Unregistered URLs behave like a registry that has never heard of them.
            None => Err(FetchError::Status(404)),
        }
    }
}
