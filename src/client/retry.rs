//! Retry policy for outbound TFE API requests
//!
//! Transient failures (rate limiting and server errors) are retried with
//! exponential backoff. The policy mirrors the classic urllib3-style retry
//! adapter: a fixed attempt ceiling, a configurable backoff factor, and a
//! fixed set of retriable status codes. A `Retry-After` header from the
//! upstream, when present, overrides the computed delay.

use std::time::Duration;

use reqwest::StatusCode;

/// Status codes that trigger a retry. 429 covers TFE rate limiting.
const RETRIABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Retry behavior for the HTTP client.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the initial one
    pub max_attempts: u32,

    /// Multiplier for the exponential backoff schedule
    pub backoff_factor: f64,

    /// Upper bound on any single backoff delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            backoff_factor: 2.0,
            max_delay: Duration::from_secs(120),
        }
    }
}

impl RetryPolicy {
    /// Policy with near-zero delays, for tests.
    #[cfg(test)]
    pub fn fast() -> Self {
        Self {
            max_attempts: 6,
            backoff_factor: 0.001,
            max_delay: Duration::from_millis(5),
        }
    }

    /// Whether a response status should be retried.
    pub fn is_retriable(&self, status: StatusCode) -> bool {
        RETRIABLE_STATUSES.contains(&status.as_u16())
    }

    /// Whether another attempt is allowed after `attempt` completed attempts.
    pub fn allows_retry(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }

    /// Delay before the retry following completed attempt number `attempt`
    /// (0-based). Follows `factor * 2^attempt`, capped at `max_delay`;
    /// `retry_after`, if the server sent one, takes precedence.
    pub fn backoff_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(after) = retry_after {
            return after.min(self.max_delay);
        }

        let exp = 2_f64.powi(attempt as i32);
        let delay = Duration::from_secs_f64(self.backoff_factor * exp);
        delay.min(self.max_delay)
    }
}

/// Parse a `Retry-After` header value given in whole seconds.
pub fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}
