//! Site-template extraction for the known listing markup.
//!
//! Listing entries are anchors carrying a recognizable class. The title
//! lives in a nested slot; location and seniority are usually rendered as
//! siblings of the anchor, so metadata is searched in the nearest ancestor
//! container rather than in the anchor itself.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

use super::{element_text, ExtractionContext};
use crate::domain::models::{ExperienceLevel, JobRecord};

fn anchors() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("a").unwrap())
}

fn title_slot() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(".positionLink").unwrap())
}

fn headings() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap())
}

fn any_element() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("*").unwrap())
}

fn listing_class() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)positionItem|job|listing|title").unwrap())
}

fn location_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("(?i)location").unwrap())
}

// Seniority tags are matched exactly as sites author them, case-sensitive.
fn experience_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(Entry-level|Mid-level|Senior)\b").unwrap())
}

fn employment_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(Full-time|Part-time|Contract)\b|משרה מלאה|משרה חלקית").unwrap()
    })
}

pub fn extract(page: &str, ctx: &ExtractionContext<'_>) -> Vec<JobRecord> {
    let html = Html::parse_document(page);
    let mut jobs = Vec::new();

    for anchor in html.select(anchors()) {
        let class = anchor.value().attr("class").unwrap_or("");
        if !listing_class().is_match(class) {
            continue;
        }

        let title = anchor
            .select(title_slot())
            .next()
            .or_else(|| anchor.select(headings()).next())
            .map(element_text)
            .unwrap_or_default();

        let link = anchor.value().attr("href").unwrap_or("").trim().to_string();

        let scope = parent_scope(anchor);
        let location = find_location(scope);
        let scope_text = scope.text().collect::<String>();

        let experience_level = experience_tag()
            .find(&scope_text)
            .map(|m| ExperienceLevel::from_tag(m.as_str()))
            .unwrap_or(ExperienceLevel::NotSpecified);

        let employment_type = employment_tag()
            .find(&scope_text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        jobs.push(JobRecord {
            company: ctx.company.to_string(),
            title,
            location,
            description: String::new(),
            link,
            experience_level,
            employment_type,
        });
    }

    jobs
}

fn parent_scope(anchor: ElementRef) -> ElementRef {
    anchor.parent().and_then(ElementRef::wrap).unwrap_or(anchor)
}

/// A location marker is an element whose class or template binding mentions
/// "location". Its value is the marker's own text or, for bare icon
/// markers, the text node that follows it.
fn find_location(scope: ElementRef) -> String {
    for el in scope.select(any_element()) {
        let is_marker = el.value().attrs().any(|(name, value)| {
            (name == "class" || name.starts_with("ng-") || name.starts_with("data-"))
                && location_marker().is_match(value)
        });
        if !is_marker {
            continue;
        }

        let own = element_text(el);
        if !own.is_empty() {
            return own;
        }

        for sibling in el.next_siblings() {
            if let Some(text) = sibling.value().as_text() {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
    }

    String::new()
}
