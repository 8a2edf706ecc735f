//! The filter specification value object.

use std::collections::BTreeSet;

use memorial_map_record::validate::is_iso_date;
use memorial_map_record::Category;
use serde::{Deserialize, Serialize};

use crate::FilterError;

/// Default start of the date window.
pub const DEFAULT_DATE_START: &str = "1944-08-01";

/// Default end of the date window.
pub const DEFAULT_DATE_END: &str = "1944-08-31";

/// What the user currently wants to see.
///
/// The two set-valued dimensions treat "empty" differently: no categories
/// means nothing is shown, while no areas means every commune is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Categories to show. Empty hides everything.
    pub categories: BTreeSet<Category>,
    /// Communes to show. Empty means no restriction.
    pub areas: BTreeSet<String>,
    /// Inclusive start of the date window (ISO `YYYY-MM-DD`).
    pub date_start: String,
    /// Inclusive end of the date window (ISO `YYYY-MM-DD`).
    pub date_end: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            categories: Category::all().iter().copied().collect(),
            areas: BTreeSet::new(),
            date_start: DEFAULT_DATE_START.to_string(),
            date_end: DEFAULT_DATE_END.to_string(),
        }
    }
}

impl FilterSpec {
    /// All categories, all communes, within `[date_start, date_end]`.
    #[must_use]
    pub fn with_window(date_start: impl Into<String>, date_end: impl Into<String>) -> Self {
        Self {
            date_start: date_start.into(),
            date_end: date_end.into(),
            ..Self::default()
        }
    }

    /// Replaces the category set.
    #[must_use]
    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    /// Replaces the commune set.
    #[must_use]
    pub fn areas<S: Into<String>>(mut self, areas: impl IntoIterator<Item = S>) -> Self {
        self.areas = areas.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the date window.
    #[must_use]
    pub fn dates(mut self, date_start: impl Into<String>, date_end: impl Into<String>) -> Self {
        self.date_start = date_start.into();
        self.date_end = date_end.into();
        self
    }

    /// Returns `true` if `category` is selected.
    #[must_use]
    pub fn allows_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Returns `true` if `area` is selected or no commune restriction is set.
    #[must_use]
    pub fn allows_area(&self, area: &str) -> bool {
        self.areas.is_empty() || self.areas.contains(area)
    }

    /// Builds a spec from untyped, comma-separated input.
    ///
    /// `None` keeps the corresponding part of `defaults`. An empty
    /// `categories` string selects no category; an empty `areas` string
    /// removes the commune restriction. Blank list items are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] for an unknown category name or a date that
    /// is not a valid `YYYY-MM-DD` calendar date.
    pub fn from_parts(
        categories: Option<&str>,
        areas: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
        defaults: &Self,
    ) -> Result<Self, FilterError> {
        let categories = match categories {
            Some(list) => parse_categories(list)?,
            None => defaults.categories.clone(),
        };

        let areas = match areas {
            Some(list) => split_areas(list).map(str::to_string).collect(),
            None => defaults.areas.clone(),
        };

        let date_start = parse_date(from, &defaults.date_start)?;
        let date_end = parse_date(to, &defaults.date_end)?;

        Ok(Self {
            categories,
            areas,
            date_start,
            date_end,
        })
    }
}

/// Parses a comma-separated list of category names.
///
/// # Errors
///
/// Returns [`FilterError::InvalidCategory`] for the first unknown name.
pub fn parse_categories(list: &str) -> Result<BTreeSet<Category>, FilterError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| {
            name.parse::<Category>()
                .map_err(|_| FilterError::InvalidCategory {
                    value: name.to_string(),
                })
        })
        .collect()
}

fn parse_date(value: Option<&str>, default: &str) -> Result<String, FilterError> {
    match value.map(str::trim) {
        None | Some("") => Ok(default.to_string()),
        Some(date) if is_iso_date(date) => Ok(date.to_string()),
        Some(date) => Err(FilterError::InvalidDate {
            value: date.to_string(),
        }),
    }
}

/// Commune names are kept verbatim, like the register's.
fn split_areas(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shows_everything_in_august_1944() {
        let spec = FilterSpec::default();
        assert_eq!(spec.categories.len(), 3);
        assert!(spec.areas.is_empty());
        assert_eq!(spec.date_start, "1944-08-01");
        assert_eq!(spec.date_end, "1944-08-31");
        assert!(spec.allows_area("Vizille"));
    }

    #[test]
    fn from_parts_keeps_defaults_for_missing_parts() {
        let defaults = FilterSpec::default().areas(["Vizille"]);
        let spec = FilterSpec::from_parts(None, None, None, None, &defaults).unwrap();
        assert_eq!(spec, defaults);
    }

    #[test]
    fn empty_category_list_selects_nothing() {
        let spec =
            FilterSpec::from_parts(Some(""), None, None, None, &FilterSpec::default()).unwrap();
        assert!(spec.categories.is_empty());
    }

    #[test]
    fn empty_area_list_lifts_the_restriction() {
        let defaults = FilterSpec::default().areas(["Vizille"]);
        let spec = FilterSpec::from_parts(None, Some(""), None, None, &defaults).unwrap();
        assert!(spec.areas.is_empty());
    }

    #[test]
    fn parses_lists_and_dates() {
        let spec = FilterSpec::from_parts(
            Some("combats, civilians"),
            Some("Vizille,Livet-et-Gavet"),
            Some("1944-08-20"),
            Some("1944-08-22"),
            &FilterSpec::default(),
        )
        .unwrap();
        assert_eq!(
            spec.categories,
            BTreeSet::from([Category::Combats, Category::Civilians])
        );
        assert_eq!(
            spec.areas,
            BTreeSet::from(["Vizille".to_string(), "Livet-et-Gavet".to_string()])
        );
        assert_eq!(spec.date_start, "1944-08-20");
        assert_eq!(spec.date_end, "1944-08-22");
    }

    #[test]
    fn rejects_unknown_category() {
        let err = FilterSpec::from_parts(Some("combats,civils"), None, None, None, &FilterSpec::default())
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidCategory { value } if value == "civils"));
    }

    #[test]
    fn rejects_malformed_date() {
        let err = FilterSpec::from_parts(None, None, Some("20/08/1944"), None, &FilterSpec::default())
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidDate { .. }));
    }

    #[test]
    fn area_names_are_not_trimmed() {
        let spec = FilterSpec::from_parts(
            Some(" combats "),
            Some("Vizille ,Claix"),
            None,
            None,
            &FilterSpec::default(),
        )
        .unwrap();
        assert_eq!(spec.categories, BTreeSet::from([Category::Combats]));
        assert_eq!(
            spec.areas,
            BTreeSet::from(["Vizille ".to_string(), "Claix".to_string()])
        );
        assert!(spec.allows_area("Vizille "));
        assert!(!spec.allows_area("Vizille"));
    }
}
