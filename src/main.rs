use anyhow::{Context, Result};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use jobwatch::config::Settings;
use jobwatch::db;
use jobwatch::domain::keywords::KeywordSet;
use jobwatch::repository::JobRepository;
use jobwatch::service::{scheduler, HttpFetcher, ScrapeService, SmtpNotifier};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let endpoints = settings.endpoints()?;
    if endpoints.is_empty() {
        tracing::warn!("No company endpoints configured; nothing will be scraped");
    }

    let pool = db::init_db(&settings.database_path).await?;
    let job_db = JobRepository::new(pool);
    let recorded = job_db.count().await?;
    tracing::info!(
        recorded,
        endpoints = endpoints.len(),
        "Starting job watcher"
    );

    let keywords = KeywordSet::with_extra(
        &settings.extra_junior_keywords,
        &settings.extra_location_keywords,
    );
    let fetcher = HttpFetcher::new(
        Duration::from_secs(settings.fetch_timeout_secs),
        settings.fetch_retries,
        Duration::from_secs(settings.fetch_backoff_secs),
    )?;
    let notifier = SmtpNotifier::new(settings.email.clone());

    let service = ScrapeService::new(fetcher, notifier, job_db, keywords, endpoints);
    scheduler::run(
        service,
        Duration::from_secs(settings.scrape_interval_minutes * 60),
    )
    .await;

    Ok(())
}
