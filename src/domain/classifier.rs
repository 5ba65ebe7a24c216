//! Junior-in-Israel classification.

use super::keywords::KeywordSet;
use super::models::{ExperienceLevel, JobRecord};

/// Decides whether a posting is a junior position located in Israel.
///
/// Pure and total over the record's defaulted string fields. Matching is
/// lowercase substring containment, deliberately not tokenized: a keyword
/// buried in an unrelated word is accepted so that no true positive is ever
/// lost to tokenization differences between Latin and Hebrew text. An
/// explicit `EntryLevel` tag from the source page is trusted over the title;
/// an absent tag defers to the title keywords.
pub fn is_junior_in_israel(
    keywords: &KeywordSet,
    title: &str,
    location: &str,
    experience_level: ExperienceLevel,
) -> bool {
    let title = title.to_lowercase();
    let location = location.to_lowercase();

    let is_junior = experience_level == ExperienceLevel::EntryLevel
        || keywords.junior().iter().any(|k| title.contains(k.as_str()));
    let is_israel = keywords
        .location()
        .iter()
        .any(|k| location.contains(k.as_str()));

    is_junior && is_israel
}

/// Convenience form over a whole record.
pub fn classify(keywords: &KeywordSet, job: &JobRecord) -> bool {
    is_junior_in_israel(keywords, &job.title, &job.location, job.experience_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> KeywordSet {
        KeywordSet::builtin()
    }

    #[test]
    fn entry_level_tag_trumps_title_text() {
        // No junior keyword in the title; the explicit tag alone qualifies.
        assert!(is_junior_in_israel(
            &keywords(),
            "Backend Engineer",
            "Tel Aviv, Israel",
            ExperienceLevel::EntryLevel,
        ));
    }

    #[test]
    fn title_keyword_match_is_case_insensitive() {
        assert!(is_junior_in_israel(
            &keywords(),
            "JUNIOR Developer",
            "Jerusalem",
            ExperienceLevel::NotSpecified,
        ));
    }

    #[test]
    fn location_keyword_match_is_case_insensitive() {
        assert!(is_junior_in_israel(
            &keywords(),
            "Junior Developer",
            "jerusalem",
            ExperienceLevel::NotSpecified,
        ));
    }

    #[test]
    fn rejects_locations_outside_israel() {
        assert!(!is_junior_in_israel(
            &keywords(),
            "Junior QA",
            "Berlin, Germany",
            ExperienceLevel::NotSpecified,
        ));
    }

    #[test]
    fn rejects_senior_roles() {
        assert!(!is_junior_in_israel(
            &keywords(),
            "Senior Architect",
            "Haifa",
            ExperienceLevel::Senior,
        ));
    }

    #[test]
    fn hebrew_terms_match_both_fields() {
        assert!(is_junior_in_israel(
            &keywords(),
            "מפתח זוטר",
            "ישראל",
            ExperienceLevel::NotSpecified,
        ));
    }

    #[test]
    fn title_keyword_still_qualifies_under_other_tags() {
        // A listing tagged mid-level but titled junior passes the title check.
        assert!(is_junior_in_israel(
            &keywords(),
            "Junior Data Analyst",
            "Ramat Gan",
            ExperienceLevel::MidLevel,
        ));
    }

    #[test]
    fn empty_fields_classify_false_without_panicking() {
        for level in [
            ExperienceLevel::EntryLevel,
            ExperienceLevel::MidLevel,
            ExperienceLevel::Senior,
            ExperienceLevel::NotSpecified,
        ] {
            assert!(!is_junior_in_israel(&keywords(), "", "", level));
        }
    }
}
