//! Fixed-interval scheduling of scrape cycles.

use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use crate::service::fetcher::PageFetcher;
use crate::service::notifier::Notifier;
use crate::service::scraper::ScrapeService;

/// Run the first cycle immediately, then one per interval, forever.
/// A failed cycle is logged and never stops the loop.
pub async fn run<F: PageFetcher, N: Notifier>(service: ScrapeService<F, N>, every: Duration) {
    tracing::info!(interval_secs = every.as_secs(), "Scheduler started");

    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // The first tick completes immediately.
        ticker.tick().await;
        match service.run_cycle().await {
            Ok(new_jobs) => tracing::info!(new_jobs, "Scrape cycle finished"),
            Err(e) => tracing::error!(error = %e, "Scrape cycle failed"),
        }
    }
}
