//! TFE API client implementation
//!
//! Wraps reqwest with bearer authentication, a client-side rate limiter,
//! and automatic retry with exponential backoff on transient failures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::{debug, warn};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use super::TfeApi;
use super::models::{Document, ListDocument, OrgAttributes, WorkspaceAttributes};
use super::retry::{RetryPolicy, parse_retry_after};
use crate::error::{ApiError, Result};

/// All audited endpoints live under this prefix.
const API_PREFIX: &str = "/api/v2";

/// Client-side request budget. TFE defaults to 30 requests/second per
/// token; staying well under leaves headroom for other consumers.
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// TFE API client
///
/// Cheap to share: workers hold it behind an `Arc` and issue concurrent
/// requests over reqwest's pooled connections. No mutable state is shared
/// between calls.
pub struct TfeClient {
    http: HttpClient,
    base_url: String,
    token: String,
    retry: RetryPolicy,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TfeClient {
    /// Create a new client for the given TFE instance.
    pub fn new(base_url: &str, token: String) -> Result<Self> {
        Self::with_retry_policy(base_url, token, RetryPolicy::default())
    }

    /// Create a client with a custom retry policy.
    pub fn with_retry_policy(base_url: &str, token: String, retry: RetryPolicy) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND).expect("nonzero rate limit"),
        );
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: format!("{}{}", base_url.trim_end_matches('/'), API_PREFIX),
            token,
            retry,
            rate_limiter,
        })
    }

    /// Issue a GET, retrying transient failures per the retry policy.
    ///
    /// Retriable statuses (429 and 5xx gateway/server errors) and
    /// connection-level failures are retried up to the attempt ceiling;
    /// once retries are exhausted the last response is classified like any
    /// other, so the caller sees a typed status error rather than a fault.
    /// Non-retriable statuses (404 included) return immediately.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt: u32 = 0;

        let response = loop {
            self.rate_limiter.until_ready().await;

            let result = self
                .http
                .get(&url)
                .query(query)
                .header("Authorization", format!("Bearer {}", self.token))
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if self.retry.is_retriable(status) && self.retry.allows_retry(attempt) {
                        let delay = self.retry.backoff_delay(attempt, parse_retry_after(&response));
                        warn!(
                            "GET {} returned {}, retrying in {:.1}s (attempt {}/{})",
                            path,
                            status,
                            delay.as_secs_f64(),
                            attempt + 1,
                            self.retry.max_attempts
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    break response;
                }
                Err(err) => {
                    if self.retry.allows_retry(attempt) {
                        let delay = self.retry.backoff_delay(attempt, None);
                        warn!(
                            "GET {} failed ({}), retrying in {:.1}s (attempt {}/{})",
                            path,
                            err,
                            delay.as_secs_f64(),
                            attempt + 1,
                            self.retry.max_attempts
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(ApiError::from(err).into());
                }
            }
        };

        let status = response.status();
        debug!("GET {} -> {}", path, status);

        match status {
            s if s.is_success() => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let detail = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "404 Not Found".to_string());
                Err(ApiError::NotFound(format!("{} ({})", path, detail)).into())
            }
            s => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| s.canonical_reason().unwrap_or("unknown").to_string());
                Err(ApiError::Status {
                    status: s.as_u16(),
                    message,
                }
                .into())
            }
        }
    }
}

#[async_trait]
impl TfeApi for TfeClient {
    async fn list_organizations(&self, page_number: u64) -> Result<ListDocument<OrgAttributes>> {
        let query = [
            ("page[number]", page_number.to_string()),
            ("page[size]", super::pagination::PAGE_SIZE.to_string()),
        ];
        self.get_json("/organizations", &query).await
    }

    async fn get_organization(&self, org_id: &str) -> Result<Document<OrgAttributes>> {
        let path = format!("/organizations/{}", org_id);
        self.get_json(&path, &[]).await
    }

    async fn list_workspaces(
        &self,
        org_id: &str,
        page_number: u64,
        page_size: u64,
    ) -> Result<ListDocument<WorkspaceAttributes>> {
        let path = format!("/organizations/{}/workspaces", org_id);
        let query = [
            ("page[number]", page_number.to_string()),
            ("page[size]", page_size.to_string()),
        ];
        self.get_json(&path, &query).await
    }
}
