//! Last-resort extraction: guess listings from container class vocabulary.
//!
//! When neither the listing template nor embedded data matches, containers
//! whose class names smell like job markup are mined for whatever fields
//! they expose. Recall over precision; the classifier discards the noise.

use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

use super::{element_text, ExtractionContext};
use crate::domain::models::{ExperienceLevel, JobRecord};

/// Class-name fragments that suggest a listing container.
const CONTAINER_VOCAB: &[&str] = &[
    "job",
    "career",
    "position",
    "listing",
    "opening",
    "vacancy",
    "recruitment",
];

fn any_element() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("*").unwrap())
}

fn title_bearing() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("h1, h2, h3, h4, h5, h6, a, span").unwrap())
}

fn paragraphs() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("p").unwrap())
}

fn anchors() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("a[href]").unwrap())
}

fn is_listing_container(el: ElementRef) -> bool {
    el.value().attr("class").is_some_and(|class| {
        let class = class.to_lowercase();
        CONTAINER_VOCAB.iter().any(|word| class.contains(word))
    })
}

pub fn extract(page: &str, ctx: &ExtractionContext<'_>) -> Vec<JobRecord> {
    let html = Html::parse_document(page);
    let mut jobs = Vec::new();

    for container in html.select(any_element()) {
        if !is_listing_container(container) {
            continue;
        }
        // Wrapper lists match the vocabulary too; only innermost matching
        // containers map to individual listings.
        if container.select(any_element()).any(is_listing_container) {
            continue;
        }

        let Some(title) = container
            .select(title_bearing())
            .map(element_text)
            .find(|t| !t.is_empty())
        else {
            continue;
        };

        let location = container
            .select(any_element())
            .find_map(|el| {
                let text = own_text(el);
                let lowered = text.to_lowercase();
                ctx.keywords
                    .location()
                    .iter()
                    .any(|k| lowered.contains(k.as_str()))
                    .then_some(text)
            })
            .unwrap_or_default();

        let description = container
            .select(paragraphs())
            .map(element_text)
            .find(|t| !t.is_empty())
            .unwrap_or_default();

        let link = container
            .select(anchors())
            .find_map(|a| a.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
            .unwrap_or_else(|| ctx.base_url.to_string());

        jobs.push(JobRecord {
            company: ctx.company.to_string(),
            title,
            location,
            description,
            link,
            experience_level: ExperienceLevel::NotSpecified,
            employment_type: "Unknown".to_string(),
        });
    }

    jobs
}

/// Text directly inside an element, ignoring nested elements, so a
/// location span matches without its whole ancestor chain matching too.
fn own_text(el: ElementRef) -> String {
    el.children()
        .filter_map(|node| node.value().as_text().map(|t| t.trim()))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
