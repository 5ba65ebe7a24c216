//! Domain entities for postings and scrape sources.

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// Seniority tag on a listing, when the source page provides one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExperienceLevel {
    EntryLevel,
    MidLevel,
    Senior,
    NotSpecified,
}

impl ExperienceLevel {
    /// Parse the tag text as career sites author it.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Entry-level" => ExperienceLevel::EntryLevel,
            "Mid-level" => ExperienceLevel::MidLevel,
            "Senior" => ExperienceLevel::Senior,
            _ => ExperienceLevel::NotSpecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::EntryLevel => "Entry-level",
            ExperienceLevel::MidLevel => "Mid-level",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::NotSpecified => "Not specified",
        }
    }
}

/// One discovered posting.
///
/// `company`, `title` and `location` always hold a value (empty string when
/// the page did not expose the field) so matching code downstream never
/// deals with absent fields. Built once by the extractor, read-only for the
/// classifier, the store and the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub company: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub link: String,
    pub experience_level: ExperienceLevel,
    pub employment_type: String,
}

/// One employer career-site source, fixed at configuration time.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub company_name: String,
    pub source_url: Url,
}

/// A posting as persisted, read back for logs and tests.
#[derive(Debug, Clone, Serialize)]
pub struct StoredJob {
    pub id: i64,
    pub company: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub link: String,
    pub date_posted: DateTime<Utc>,
}
