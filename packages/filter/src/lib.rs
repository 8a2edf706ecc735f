#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Visibility filtering of location groups.
//!
//! A group is visible when its category is selected, its commune is
//! selected (or no commune restriction is set), and at least one of its
//! dates falls inside the inclusive date window. Filtering is a pure
//! function of the full group set and a [`FilterSpec`]; it never starts
//! from a previous result.

mod spec;

pub use spec::{DEFAULT_DATE_END, DEFAULT_DATE_START, FilterSpec, parse_categories};

use memorial_map_location::LocationGroup;

/// Errors raised while building a [`FilterSpec`] from untyped input.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Unknown category name.
    #[error("Invalid category '{value}': expected executions, combats or civilians")]
    InvalidCategory {
        /// The rejected name.
        value: String,
    },

    /// Date not in `YYYY-MM-DD` form.
    #[error("Invalid date '{value}': expected format YYYY-MM-DD")]
    InvalidDate {
        /// The rejected value.
        value: String,
    },
}

/// Returns `true` if `group` passes all three filter dimensions.
///
/// Coordinates are not considered; see [`renderable`].
#[must_use]
pub fn passes(group: &LocationGroup, spec: &FilterSpec) -> bool {
    spec.allows_category(group.category())
        && spec.allows_area(group.area())
        && group.has_date_between(&spec.date_start, &spec.date_end)
}

/// Groups passing `spec`, in input order.
#[must_use]
pub fn visible<'a>(groups: &'a [LocationGroup], spec: &FilterSpec) -> Vec<&'a LocationGroup> {
    groups.iter().filter(|g| passes(g, spec)).collect()
}

/// Groups passing `spec` that also have a coordinate, in input order.
///
/// This is what a map draws.
#[must_use]
pub fn renderable<'a>(groups: &'a [LocationGroup], spec: &FilterSpec) -> Vec<&'a LocationGroup> {
    groups
        .iter()
        .filter(|g| g.is_renderable() && passes(g, spec))
        .collect()
}

/// The active filter plus the default it resets to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    default: FilterSpec,
    current: FilterSpec,
}

impl FilterState {
    /// Starts at `default`.
    #[must_use]
    pub fn new(default: FilterSpec) -> Self {
        Self {
            current: default.clone(),
            default,
        }
    }

    /// The active spec.
    #[must_use]
    pub const fn current(&self) -> &FilterSpec {
        &self.current
    }

    /// The filter [`FilterState::reset`] restores.
    #[must_use]
    pub const fn default_spec(&self) -> &FilterSpec {
        &self.default
    }

    /// Replaces the active spec wholesale.
    pub fn apply(&mut self, spec: FilterSpec) {
        self.current = spec;
    }

    /// Restores the default spec.
    pub fn reset(&mut self) {
        self.current = self.default.clone();
    }

    /// Groups visible under the active spec.
    #[must_use]
    pub fn visible<'a>(&self, groups: &'a [LocationGroup]) -> Vec<&'a LocationGroup> {
        visible(groups, &self.current)
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(FilterSpec::default())
    }
}

#[cfg(test)]
mod tests {
    use memorial_map_geography::{CoordinateTable, LocationEntry};
    use memorial_map_location::aggregate;
    use memorial_map_record::{Category, Record};

    use super::*;

    fn groups() -> Vec<LocationGroup> {
        let table = CoordinateTable::from_entries([
            LocationEntry {
                area: "Vizille".to_string(),
                site: "La Glacière".to_string(),
                lat: 45.0798,
                lon: 5.7798,
            },
            LocationEntry {
                area: "Claix".to_string(),
                site: "Les Peyrouses".to_string(),
                lat: 45.138,
                lon: 5.6675,
            },
        ])
        .unwrap();

        let records = vec![
            Record::new("Vizille", "La Glacière", "A", "Fusillé", "1944-08-01"),
            Record::new("Claix", "Les Peyrouses", "B", "Mort au combat", "1944-08-31"),
            Record::new("Séchilienne", "Les Clots", "C", "Victime civile", "1944-08-22"),
            Record::new("Vizille", "Les Rivoirands", "D", "Fusillé", "1944-07-31"),
            Record::new("Livet-et-Gavet", "Gavet", "E", "Fusillé", "1944-09-01"),
        ];
        aggregate(&records, &table)
    }

    fn sites<'a>(groups: &[&'a LocationGroup]) -> Vec<&'a str> {
        groups.iter().map(|g| g.site()).collect()
    }

    #[test]
    fn no_categories_shows_nothing() {
        let groups = groups();
        let spec = FilterSpec::default().categories([]);
        assert!(visible(&groups, &spec).is_empty());
    }

    #[test]
    fn no_areas_shows_every_commune() {
        let groups = groups();
        let spec = FilterSpec::default().areas(Vec::<String>::new());
        assert_eq!(
            sites(&visible(&groups, &spec)),
            vec!["La Glacière", "Les Peyrouses", "Les Clots"]
        );
    }

    #[test]
    fn window_edges_are_inclusive() {
        let groups = groups();
        let spec = FilterSpec::default();
        let shown = sites(&visible(&groups, &spec));
        // 1944-08-01 and 1944-08-31 are on the edges.
        assert!(shown.contains(&"La Glacière"));
        assert!(shown.contains(&"Les Peyrouses"));
        // 1944-07-31 and 1944-09-01 are one day outside.
        assert!(!shown.contains(&"Les Rivoirands"));
        assert!(!shown.contains(&"Gavet"));
    }

    #[test]
    fn area_restriction() {
        let groups = groups();
        let spec = FilterSpec::default().areas(["Claix", "Séchilienne"]);
        assert_eq!(
            sites(&visible(&groups, &spec)),
            vec!["Les Peyrouses", "Les Clots"]
        );
    }

    #[test]
    fn category_selection() {
        let groups = groups();
        let spec = FilterSpec::default().categories([Category::Civilians, Category::Executions]);
        assert_eq!(
            sites(&visible(&groups, &spec)),
            vec!["La Glacière", "Les Clots"]
        );
    }

    #[test]
    fn unresolved_groups_pass_but_are_not_renderable() {
        let groups = groups();
        let spec = FilterSpec::default();
        let clots = groups.iter().find(|g| g.site() == "Les Clots").unwrap();
        assert!(passes(clots, &spec));
        assert_eq!(
            sites(&renderable(&groups, &spec)),
            vec!["La Glacière", "Les Peyrouses"]
        );
    }

    #[test]
    fn filtering_is_deterministic() {
        let groups = groups();
        let spec = FilterSpec::default().areas(["Vizille", "Claix"]);
        assert_eq!(visible(&groups, &spec), visible(&groups, &spec));
    }

    #[test]
    fn apply_replaces_and_reset_restores() {
        let groups = groups();
        let mut state = FilterState::default();
        assert_eq!(state.visible(&groups).len(), 3);

        state.apply(FilterSpec::default().areas(["Claix"]));
        assert_eq!(sites(&state.visible(&groups)), vec!["Les Peyrouses"]);

        // A new spec starts from the full set, not the previous result.
        state.apply(FilterSpec::default().areas(["Vizille"]));
        assert_eq!(sites(&state.visible(&groups)), vec!["La Glacière"]);

        state.reset();
        assert_eq!(state.current(), state.default_spec());
        assert_eq!(state.visible(&groups).len(), 3);
    }

    #[test]
    fn inverted_window_shows_nothing() {
        let groups = groups();
        let spec = FilterSpec::default().dates("1944-08-31", "1944-08-01");
        assert!(visible(&groups, &spec).is_empty());
    }
}
