use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::config::ScanConfig;
use crate::errors::{AppResult, SourceError, SourceResult};
use crate::utils::status_code_matcher::status_matches_any;

/// HTTP access used by the prober and the harvester
///
/// Implementations apply their own timeout and retry policy; callers only
/// see the final outcome.
#[async_trait]
pub trait ScanHttpClient: Send + Sync {
    /// GET `url` and return the final status code without reading the body
    async fn get_status(&self, url: &str) -> SourceResult<u16>;

    /// GET `url` and return the body, failing unless the final status is 200
    async fn get_body(&self, url: &str) -> SourceResult<Vec<u8>>;
}

/// When and how long to wait before re-sending a request
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_factor: Duration,
    pub max_backoff: Duration,
    pub retry_status_codes: Vec<String>,
}

impl RetryPolicy {
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_factor: config.backoff_factor,
            max_backoff: config.max_backoff,
            retry_status_codes: config.retry_status_codes.clone(),
        }
    }

    pub fn is_retryable(&self, status: u16) -> bool {
        status_matches_any(status, &self.retry_status_codes)
    }

    /// Sleep before retry number `retry` (1-based)
    ///
    /// A server supplied `Retry-After` wins over the exponential schedule;
    /// both are capped at `max_backoff`.
    pub fn delay_for(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        let exponential = self
            .backoff_factor
            .saturating_mul(2u32.saturating_pow(retry.saturating_sub(1)));
        retry_after.unwrap_or(exponential).min(self.max_backoff)
    }
}

/// reqwest-backed client with a total timeout, optional certificate
/// checking and status based retries
#[derive(Clone)]
pub struct RetryingHttpClient {
    client: Client,
    policy: RetryPolicy,
}

impl RetryingHttpClient {
    pub fn new(config: &ScanConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            policy: RetryPolicy::from_config(config),
        })
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    async fn send_with_retry(&self, url: &str) -> SourceResult<Response> {
        let mut retries = 0u32;

        loop {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| SourceError::from_transport(url, &e))?;

            let status = response.status().as_u16();
            if retries >= self.policy.max_retries || !self.policy.is_retryable(status) {
                return Ok(response);
            }

            retries += 1;
            let delay = self.policy.delay_for(retries, retry_after(&response));
            debug!(
                "Retrying {} after status {} (attempt {}/{}, waiting {:?})",
                url, status, retries, self.policy.max_retries, delay
            );
            drop(response);
            tokio::time::sleep(delay).await;
        }
    }
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[async_trait]
impl ScanHttpClient for RetryingHttpClient {
    async fn get_status(&self, url: &str) -> SourceResult<u16> {
        let response = self.send_with_retry(url).await?;
        Ok(response.status().as_u16())
    }

    async fn get_body(&self, url: &str) -> SourceResult<Vec<u8>> {
        let response = self.send_with_retry(url).await?;
        if response.status() != StatusCode::OK {
            return Err(SourceError::http(response.status().as_u16(), url));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::from_transport(url, &e))?;
        debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
