//! Raw listing fetcher: one employer endpoint in, page markup out.
//!
//! Retry policy lives here, not in the orchestrator: a fixed number of
//! attempts with a fixed backoff between them. A failed endpoint is the
//! caller's signal to skip it, never to abort the run.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::models::EndpointConfig;
use crate::error::{AppError, Result};
use crate::service::http::create_client;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the markup of one employer's listing page.
    async fn fetch(&self, endpoint: &EndpointConfig) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
    retries: u32,
    backoff: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, retries: u32, backoff: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: create_client(timeout)?,
            retries,
            backoff,
        })
    }

    async fn fetch_once(&self, endpoint: &EndpointConfig) -> Result<String> {
        let response = self
            .client
            .get(endpoint.source_url.as_str())
            .send()
            .await
            .map_err(|e| AppError::network(format!("{}: {e}", endpoint.source_url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::network(format!(
                "{} returned {status}",
                endpoint.source_url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::network(format!("{}: {e}", endpoint.source_url)))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, endpoint: &EndpointConfig) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(endpoint).await {
                Ok(body) => {
                    tracing::debug!(
                        company = %endpoint.company_name,
                        bytes = body.len(),
                        "Fetched listing page"
                    );
                    return Ok(body);
                }
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    tracing::warn!(
                        company = %endpoint.company_name,
                        attempt,
                        error = %e,
                        "Fetch failed, retrying"
                    );
                    sleep(self.backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
