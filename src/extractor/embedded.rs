//! Embedded-data fallback: job arrays shipped inside script blocks.
//!
//! Covers the two shapes seen on the watched sites: a JavaScript variable
//! assigned a JSON array of job objects, and schema.org `ld+json` blocks
//! holding `JobPosting` entries. A block that fails to parse is treated as
//! "no data", never as an error.

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use std::sync::OnceLock;

use super::ExtractionContext;
use crate::domain::models::{ExperienceLevel, JobRecord};

fn scripts() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("script").unwrap())
}

// Lazy body match keeps the capture to the first closing "];" which is
// enough for the flat arrays these pages embed.
fn array_assignment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:var|let|const)\s+[A-Za-z_$][\w$]*\s*=\s*(\[[\s\S]*?\])\s*;").unwrap()
    })
}

pub fn extract(page: &str, ctx: &ExtractionContext<'_>) -> Vec<JobRecord> {
    let html = Html::parse_document(page);
    let mut jobs = Vec::new();

    for script in html.select(scripts()) {
        let body = script.text().collect::<String>();
        if body.trim().is_empty() {
            continue;
        }

        let is_ld_json = script
            .value()
            .attr("type")
            .is_some_and(|t| t.contains("ld+json"));

        let parsed: Option<Value> = if is_ld_json {
            serde_json::from_str(&body).ok()
        } else {
            array_assignment()
                .captures(&body)
                .and_then(|caps| caps.get(1))
                .and_then(|m| serde_json::from_str(m.as_str()).ok())
        };

        if let Some(value) = parsed {
            collect_postings(&value, ctx, &mut jobs);
        }
    }

    jobs
}

fn collect_postings(value: &Value, ctx: &ExtractionContext<'_>, out: &mut Vec<JobRecord>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_postings(item, ctx, out);
            }
        }
        Value::Object(obj) => {
            if let Some(graph) = obj.get("@graph") {
                collect_postings(graph, ctx, out);
            }
            if let Some(job) = posting_from_object(obj, ctx) {
                out.push(job);
            }
        }
        _ => {}
    }
}

fn posting_from_object(obj: &Map<String, Value>, ctx: &ExtractionContext<'_>) -> Option<JobRecord> {
    // Typed ld+json entities must be postings; untyped objects just need a title.
    if let Some(kind) = obj.get("@type").and_then(Value::as_str) {
        if kind != "JobPosting" {
            return None;
        }
    }

    let title = str_field(obj, &["title", "name"])?.trim().to_string();
    if title.is_empty() {
        return None;
    }

    let employment_type = str_field(obj, &["employmentType", "employment_type"])
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    Some(JobRecord {
        company: ctx.company.to_string(),
        title,
        location: location_field(obj),
        description: str_field(obj, &["description"])
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        link: link_field(obj, ctx),
        experience_level: ExperienceLevel::NotSpecified,
        employment_type,
    })
}

fn str_field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| obj.get(*key).and_then(Value::as_str))
}

fn location_field(obj: &Map<String, Value>) -> String {
    if let Some(s) = obj.get("location").and_then(Value::as_str) {
        return s.trim().to_string();
    }
    obj.get("jobLocation")
        .and_then(locality)
        .unwrap_or_default()
}

// schema.org jobLocation: a Place (or list of them) wrapping a PostalAddress.
fn locality(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => items.iter().find_map(locality),
        Value::Object(obj) => {
            if let Some(found) = obj.get("address").and_then(locality) {
                return Some(found);
            }
            let city = obj.get("addressLocality").and_then(Value::as_str);
            let country = obj.get("addressCountry").and_then(Value::as_str);
            match (city, country) {
                (Some(city), Some(country)) => {
                    Some(format!("{}, {}", city.trim(), country.trim()))
                }
                (Some(city), None) => Some(city.trim().to_string()),
                (None, Some(country)) => Some(country.trim().to_string()),
                (None, None) => None,
            }
        }
        Value::String(s) => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Absolute link when the object carries one; otherwise synthesized by
/// joining the page URL with the element's identifier.
fn link_field(obj: &Map<String, Value>, ctx: &ExtractionContext<'_>) -> String {
    for key in ["url", "link"] {
        if let Some(s) = obj.get(key).and_then(Value::as_str) {
            let s = s.trim();
            if !s.is_empty() {
                return ctx
                    .base_url
                    .join(s)
                    .map(|u| u.to_string())
                    .unwrap_or_else(|_| s.to_string());
            }
        }
    }

    for key in ["id", "uid", "slug"] {
        let id = match obj.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => continue,
        };
        if let Ok(joined) = ctx.base_url.join(&id) {
            return joined.to_string();
        }
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keywords::KeywordSet;
    use url::Url;

    fn extract_from(page: &str) -> Vec<JobRecord> {
        let base_url = Url::parse("https://example.com/careers/globex").unwrap();
        let keywords = KeywordSet::builtin();
        let ctx = ExtractionContext {
            company: "globex",
            base_url: &base_url,
            keywords: &keywords,
        };
        extract(page, &ctx)
    }

    #[test]
    fn parses_script_variable_array() {
        let page = r#"
            <html><body><script>
              var positionData = [
                {"title": "Junior QA Engineer", "location": "Haifa", "description": "Test things", "id": "qa-42"},
                {"title": "Senior Architect", "location": "Berlin", "id": "arch-1"}
              ];
            </script></body></html>
        "#;

        let jobs = extract_from(page);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Junior QA Engineer");
        assert_eq!(jobs[0].location, "Haifa");
        assert_eq!(jobs[0].description, "Test things");
        assert_eq!(jobs[0].link, "https://example.com/careers/qa-42");
        assert_eq!(jobs[0].experience_level, ExperienceLevel::NotSpecified);
        assert_eq!(jobs[1].location, "Berlin");
    }

    #[test]
    fn parses_ld_json_job_postings() {
        let page = r#"
            <html><head>
            <script type="application/ld+json">
            [
              {
                "@type": "JobPosting",
                "title": "Junior Frontend Developer",
                "employmentType": "FULL_TIME",
                "url": "/jobs/fe-12",
                "jobLocation": {"@type": "Place", "address": {"addressLocality": "Netanya", "addressCountry": "Israel"}}
              },
              {"@type": "Organization", "name": "Globex"}
            ]
            </script></head><body></body></html>
        "#;

        let jobs = extract_from(page);
        assert_eq!(jobs.len(), 1, "non-posting entities are skipped");
        assert_eq!(jobs[0].title, "Junior Frontend Developer");
        assert_eq!(jobs[0].location, "Netanya, Israel");
        assert_eq!(jobs[0].employment_type, "FULL_TIME");
        assert_eq!(jobs[0].link, "https://example.com/jobs/fe-12");
    }

    #[test]
    fn malformed_json_is_treated_as_no_data() {
        let page = r#"
            <html><body>
              <script>var jobs = [{"title": "Broken",];</script>
              <script type="application/ld+json">{not json}</script>
            </body></html>
        "#;

        assert!(extract_from(page).is_empty());
    }

    #[test]
    fn objects_without_titles_are_skipped() {
        let page = r#"<script>var rows = [{"location": "Haifa"}, {"title": ""}];</script>"#;
        assert!(extract_from(page).is_empty());
    }

    #[test]
    fn numeric_identifiers_join_against_the_page_url() {
        let page = r#"<script>let l = [{"title": "Junior Dev", "id": 99}];</script>"#;
        let jobs = extract_from(page);
        assert_eq!(jobs[0].link, "https://example.com/careers/99");
    }
}
