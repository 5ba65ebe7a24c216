//! Converts raw career-page markup into candidate job records.
//!
//! Employer pages vary wildly, so extraction is layered from most specific
//! to most generic: the site-template strategy for the known listing markup,
//! an embedded-JSON fallback for pages that ship their data in script
//! blocks, and a last-resort heuristic sweep over container class names.
//! Strategies run in order and the first one that yields any candidate
//! wins. Malformed markup is never an error; it just yields fewer
//! (possibly zero) candidates.

mod embedded;
mod heuristic;
mod template;

use scraper::ElementRef;
use url::Url;

use crate::domain::keywords::KeywordSet;
use crate::domain::models::JobRecord;

/// Per-endpoint inputs shared by every strategy.
pub struct ExtractionContext<'a> {
    pub company: &'a str,
    pub base_url: &'a Url,
    pub keywords: &'a KeywordSet,
}

type Strategy = fn(&str, &ExtractionContext<'_>) -> Vec<JobRecord>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("template", template::extract),
    ("embedded", embedded::extract),
    ("heuristic", heuristic::extract),
];

/// Extract job candidates from one page, in document order.
pub fn extract_jobs(page: &str, ctx: &ExtractionContext<'_>) -> Vec<JobRecord> {
    for (name, strategy) in STRATEGIES {
        let jobs = strategy(page, ctx);
        if !jobs.is_empty() {
            tracing::debug!(
                strategy = name,
                candidates = jobs.len(),
                company = ctx.company,
                "Extraction strategy matched"
            );
            return jobs;
        }
    }

    tracing::debug!(company = ctx.company, "No strategy yielded candidates");
    Vec::new()
}

/// Visible text of an element, trimmed.
pub(crate) fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
