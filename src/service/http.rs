use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// Factory for the HTTP client used against employer career pages.
/// Every request is bounded by the same fixed timeout.
pub fn create_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("jobwatch/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}
