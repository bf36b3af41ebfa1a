use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::error::ApiError;
use crate::model::api::{ActionResponse, ErrorBody, LogsResponse, ReasoningResponse, TripResponse};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin client for the TripMaster dashboard API. No retries, no backoff:
/// one request, one answer.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, method: Method, path: &str) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");

        let response = self
            .client
            .request(method, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("API error {}", status.as_u16()));
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn request<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T, ApiError> {
        let response = self.send(method, path).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn get_trip(&self) -> Result<TripResponse, ApiError> {
        self.request(Method::GET, "/api/dashboard/trip").await
    }

    pub async fn get_reasoning(&self) -> Result<ReasoningResponse, ApiError> {
        self.request(Method::GET, "/api/dashboard/reasoning").await
    }

    pub async fn get_logs(&self) -> Result<LogsResponse, ApiError> {
        self.request(Method::GET, "/api/dashboard/logs").await
    }

    pub async fn simulate_delay(&self) -> Result<ActionResponse, ApiError> {
        self.request(Method::POST, "/api/dashboard/simulate-delay").await
    }

    pub async fn simulate_cancel(&self) -> Result<ActionResponse, ApiError> {
        self.request(Method::POST, "/api/dashboard/simulate-cancel").await
    }

    pub async fn approve(&self) -> Result<ActionResponse, ApiError> {
        self.request(Method::POST, "/api/dashboard/approve").await
    }

    pub async fn modify(&self) -> Result<ActionResponse, ApiError> {
        self.request(Method::POST, "/api/dashboard/modify").await
    }

    /// Plain-text health probe.
    pub async fn health(&self) -> Result<String, ApiError> {
        let response = self.send(Method::GET, "/health").await?;
        Ok(response.text().await?)
    }
}
