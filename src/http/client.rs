use crate::backoff::{Attempt, RetryPolicy};
use crate::errors::UpstreamError;
use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client with timeouts and retry-with-backoff on transient failures
pub struct RetryingClient {
    client: Client,
    policy: RetryPolicy,
}

impl RetryingClient {
    pub fn new(user_agent: &str, timeout_secs: u64, policy: RetryPolicy) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        Ok(Self { client, policy })
    }

    /// GET `url` and decode the JSON body.
    ///
    /// Non-retryable statuses fail with `UpstreamError::Status`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let body = self
            .policy
            .run(url, |_| self.try_get(url))
            .await?;

        serde_json::from_str(&body).map_err(|source| UpstreamError::Decode {
            what: url.to_string(),
            source,
        })
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn try_get(&self, url: &str) -> Attempt<String> {
        debug!("GET {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) if Self::is_transient(&err) => return Attempt::Retry { status: None },
            Err(source) => return Attempt::Fail(Self::transport(url, source)),
        };

        let status = response.status().as_u16();
        if RetryPolicy::is_retryable_status(status) {
            return Attempt::Retry {
                status: Some(status),
            };
        }
        if !response.status().is_success() {
            return Attempt::Fail(UpstreamError::Status {
                status,
                url: url.to_string(),
            });
        }

        match response.text().await {
            Ok(body) => Attempt::Done(body),
            Err(source) => Attempt::Fail(Self::transport(url, source)),
        }
    }

    fn is_transient(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    fn transport(url: &str, source: reqwest::Error) -> UpstreamError {
        UpstreamError::Transport {
            url: url.to_string(),
            source,
        }
    }
}
