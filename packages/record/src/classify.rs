//! Status text classification.
//!
//! Maps the free-text `statut` column to a [`Category`]. The rules are
//! ordered and the first match wins: any mention of combat beats any
//! mention of civilians, and everything else falls back to
//! [`Category::Executions`]. There is no positive keyword for executions.

use memorial_map_record_models::{Category, Record};

/// Substrings that mark a combat death.
const COMBAT_KEYWORDS: &[&str] = &["combat"];

/// Substrings that mark a civilian victim.
const CIVILIAN_KEYWORDS: &[&str] = &["civil"];

/// Classifies a set of statuses as a whole.
///
/// Matching is a case-insensitive substring search. A set mixing combat and
/// civilian statuses classifies as [`Category::Combats`]; an empty set
/// classifies as [`Category::Executions`].
#[must_use]
pub fn classify<I, S>(statuses: I) -> Category
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lowered: Vec<String> = statuses
        .into_iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect();

    if lowered.iter().any(|s| contains_any(s, COMBAT_KEYWORDS)) {
        return Category::Combats;
    }
    if lowered.iter().any(|s| contains_any(s, CIVILIAN_KEYWORDS)) {
        return Category::Civilians;
    }

    Category::Executions
}

/// Classifies a single status string.
#[must_use]
pub fn classify_status(status: &str) -> Category {
    classify([status])
}

/// Classifies one record by its own status only.
#[must_use]
pub fn classify_record(record: &Record) -> Category {
    classify_status(&record.status)
}

/// Checks if `haystack` contains any of the given `needles`.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
