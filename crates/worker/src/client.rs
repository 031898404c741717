//! Homework status API client
//!
//! One GET per poll cycle, no retries. The loop retries by sleeping and
//! polling again.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Errors returned while fetching statuses
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Endpoint {endpoint} is unreachable: {reason}")]
    Unreachable { endpoint: String, reason: String },

    #[error("Endpoint {endpoint} returned empty data")]
    EmptyData { endpoint: String },

    #[error("Endpoint returned malformed JSON: {0}")]
    Decode(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Source of raw homework status bodies
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait StatusSource: Send + Sync {
    /// Fetch every status change since `from_date` (Unix seconds)
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError>;
}

/// Production status source backed by reqwest
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: Url, token: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            token: token.into(),
        })
    }

    fn unreachable(&self, reason: impl ToString) -> FetchError {
        FetchError::Unreachable {
            endpoint: self.endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("from_date", &from_date.to_string());

        info!("Requesting homework statuses (from_date={})", from_date);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(self.unreachable(format!("status {}", status)));
        }

        let body = response.text().await.map_err(|e| self.unreachable(e))?;
        debug!("Status API responded with {} bytes", body.len());

        if body.trim().is_empty() {
            return Err(FetchError::EmptyData {
                endpoint: self.endpoint.to_string(),
            });
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        if is_falsy(&value) {
            return Err(FetchError::EmptyData {
                endpoint: self.endpoint.to_string(),
            });
        }

        Ok(value)
    }
}

/// Whether a decoded body carries no data at all
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
