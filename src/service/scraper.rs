//! Scrape cycle orchestration.
//!
//! One cycle walks every configured endpoint in order: fetch, extract,
//! classify, then dedup-persist the aggregate and send the digest for the
//! new subset. Endpoint failures are isolated; a store failure aborts
//! persistence for the cycle without touching the scheduler.

use anyhow::Result;

use crate::domain::classifier;
use crate::domain::keywords::KeywordSet;
use crate::domain::models::{EndpointConfig, JobRecord};
use crate::extractor::{self, ExtractionContext};
use crate::repository::JobRepository;
use crate::service::fetcher::PageFetcher;
use crate::service::notifier::Notifier;

pub struct ScrapeService<F, N> {
    fetcher: F,
    notifier: N,
    job_db: JobRepository,
    keywords: KeywordSet,
    endpoints: Vec<EndpointConfig>,
}

impl<F: PageFetcher, N: Notifier> ScrapeService<F, N> {
    pub fn new(
        fetcher: F,
        notifier: N,
        job_db: JobRepository,
        keywords: KeywordSet,
        endpoints: Vec<EndpointConfig>,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            job_db,
            keywords,
            endpoints,
        }
    }

    /// Run one full scrape cycle. Returns the number of newly stored jobs.
    pub async fn run_cycle(&self) -> Result<usize> {
        let mut matches = Vec::new();

        for endpoint in &self.endpoints {
            tracing::info!(
                company = %endpoint.company_name,
                url = %endpoint.source_url,
                "Scraping endpoint"
            );

            let page = match self.fetcher.fetch(endpoint).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!(
                        company = %endpoint.company_name,
                        error = %e,
                        "Fetch failed, skipping endpoint"
                    );
                    continue;
                }
            };

            let accepted = self.collect_matches(endpoint, &page);
            tracing::info!(
                company = %endpoint.company_name,
                accepted = accepted.len(),
                "Endpoint done"
            );
            matches.extend(accepted);
        }

        if matches.is_empty() {
            tracing::info!("No matching jobs found this cycle");
            return Ok(0);
        }

        let new_jobs = self.job_db.filter_new(&matches).await?;

        if let Err(e) = self.notifier.notify(&new_jobs).await {
            tracing::error!(error = %e, "Digest notification failed");
        }

        Ok(new_jobs.len())
    }

    /// Extraction and classification happen together in one sync scope;
    /// parsed HTML must not be held across an await.
    fn collect_matches(&self, endpoint: &EndpointConfig, page: &str) -> Vec<JobRecord> {
        let ctx = ExtractionContext {
            company: &endpoint.company_name,
            base_url: &endpoint.source_url,
            keywords: &self.keywords,
        };
        let candidates = extractor::extract_jobs(page, &ctx);
        tracing::info!(
            company = %endpoint.company_name,
            candidates = candidates.len(),
            "Extracted candidates"
        );

        candidates
            .into_iter()
            .filter(|job| {
                let keep = classifier::classify(&self.keywords, job);
                if !keep {
                    tracing::debug!(
                        company = %job.company,
                        title = %job.title,
                        location = %job.location,
                        "Candidate rejected by classifier"
                    );
                }
                keep
            })
            .collect()
    }
}
