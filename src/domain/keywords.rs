//! Keyword tables for junior-role and Israel-location matching.
//!
//! Both tables mix Latin and Hebrew terms because the watched career pages
//! do. Matching is lowercase substring containment, so every entry is
//! stored lowercased.

/// Title fragments that mark a junior-level opening.
const JUNIOR_KEYWORDS: &[&str] = &[
    "junior",
    "entry-level",
    "associate",
    "graduate",
    "מתחיל",
    "זוטר",
];

/// Location fragments that place an opening in Israel.
const LOCATION_KEYWORDS: &[&str] = &[
    "israel",
    "tel aviv",
    "jerusalem",
    "haifa",
    "bnei brak",
    "bat yam",
    "rishon letsiyon",
    "kfar saba",
    "netanya",
    "rosh haayin",
    "ramat gan",
    "hod hasharon",
    "tlv",
    "rehovot",
    "herzliya",
    "or yehuda",
    "raanana",
    "givatayim",
    "yehud monosson",
    "ירושלים",
    "חיפה",
    "ישראל",
];

/// Process-wide classification keyword sets, built once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    junior: Vec<String>,
    location: Vec<String>,
}

impl KeywordSet {
    /// The built-in tables alone.
    pub fn builtin() -> Self {
        Self::with_extra(&[], &[])
    }

    /// Built-in tables extended (never replaced) with configured terms.
    /// Everything is lowercased here so matching never re-normalizes.
    pub fn with_extra(junior_extra: &[String], location_extra: &[String]) -> Self {
        Self {
            junior: merge(JUNIOR_KEYWORDS, junior_extra),
            location: merge(LOCATION_KEYWORDS, location_extra),
        }
    }

    pub fn junior(&self) -> &[String] {
        &self.junior
    }

    pub fn location(&self) -> &[String] {
        &self.location
    }
}

fn merge(builtin: &[&str], extra: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = builtin.iter().map(|k| k.to_lowercase()).collect();
    for term in extra {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !merged.contains(&term) {
            merged.push(term);
        }
    }
    merged
}
