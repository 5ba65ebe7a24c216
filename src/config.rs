//! Runtime settings, loaded once at process start.
//!
//! Layered sources: an optional TOML file (default `config.toml`, path
//! overridable via `JOBWATCH_CONFIG`) with `JOBWATCH_`-prefixed environment
//! variables on top. Nested fields use a double underscore, e.g.
//! `JOBWATCH_EMAIL__SMTP_PASS`.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

use crate::domain::models::EndpointConfig;
use crate::error::AppError;

/// One employer entry as configured: a display name and a career-page URL.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyEndpoint {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    /// Digest delivery is off until SMTP credentials are configured.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub smtp_server: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_user: String,
    #[serde(default)]
    pub smtp_pass: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            sender: String::new(),
            receiver: String::new(),
            smtp_server: String::new(),
            smtp_port: default_smtp_port(),
            smtp_user: String::new(),
            smtp_pass: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_interval_minutes")]
    pub scrape_interval_minutes: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_fetch_retries")]
    pub fetch_retries: u32,
    #[serde(default = "default_fetch_backoff_secs")]
    pub fetch_backoff_secs: u64,
    /// Employer endpoints, scraped in the order listed.
    #[serde(default)]
    pub companies: Vec<CompanyEndpoint>,
    #[serde(default)]
    pub email: EmailSettings,
    /// Extra terms merged into the builtin keyword tables.
    #[serde(default)]
    pub extra_junior_keywords: Vec<String>,
    #[serde(default)]
    pub extra_location_keywords: Vec<String>,
}

fn default_database_path() -> String {
    "jobwatch.db".to_string()
}

fn default_interval_minutes() -> u64 {
    30
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_fetch_retries() -> u32 {
    2
}

fn default_fetch_backoff_secs() -> u64 {
    5
}

fn default_smtp_port() -> u16 {
    587
}

impl Settings {
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("JOBWATCH_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let conf = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(Environment::with_prefix("JOBWATCH").separator("__"))
            .build()
            .context("Failed to assemble configuration")?;

        conf.try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Resolve the configured companies into validated endpoints, keeping
    /// configuration order.
    pub fn endpoints(&self) -> crate::error::Result<Vec<EndpointConfig>> {
        self.companies
            .iter()
            .map(|company| {
                let source_url = Url::parse(&company.url)
                    .map_err(|_| AppError::InvalidUrl(company.url.clone()))?;
                Ok(EndpointConfig {
                    company_name: company.name.clone(),
                    source_url,
                })
            })
            .collect()
    }
}
