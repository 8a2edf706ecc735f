#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location aggregation.
//!
//! Groups the flat register into one [`LocationGroup`] per
//! `(commune, lieu_dit)` key, resolves each group's coordinate from the
//! [`CoordinateTable`], and classifies the group as a whole from all of its
//! members' statuses.
//!
//! Groups are built once after loading and never change afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use memorial_map_geography::{Coordinate, CoordinateTable, location_stub};
use memorial_map_record::classify::classify;
use memorial_map_record::{Category, Record};

/// All records sharing one `(area, site)` key.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationGroup {
    area: String,
    site: String,
    records: Vec<Record>,
    dates: BTreeSet<String>,
    coordinate: Option<Coordinate>,
    category: Category,
}

impl LocationGroup {
    /// Commune name.
    #[must_use]
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Lieu-dit name.
    #[must_use]
    pub fn site(&self) -> &str {
        &self.site
    }

    /// Member records in register order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of member records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for groups built by [`aggregate`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct dates of the members, ascending.
    #[must_use]
    pub const fn dates(&self) -> &BTreeSet<String> {
        &self.dates
    }

    /// Resolved coordinate, if the site is in the coordinate table.
    #[must_use]
    pub const fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    /// Returns `true` if the group can be drawn on the map.
    #[must_use]
    pub const fn is_renderable(&self) -> bool {
        self.coordinate.is_some()
    }

    /// Category of the group as a whole. See
    /// [`memorial_map_record::classify::classify`].
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Earliest and latest dates, for display.
    #[must_use]
    pub fn date_span(&self) -> Option<DateSpan<'_>> {
        let first = self.dates.first()?;
        let last = self.dates.last()?;
        Some(DateSpan { first, last })
    }

    /// Returns `true` if any member date lies within `[start, end]`.
    ///
    /// Dates are compared as strings, which orders well-formed ISO dates
    /// chronologically.
    #[must_use]
    pub fn has_date_between(&self, start: &str, end: &str) -> bool {
        start <= end
            && self
                .dates
                .range::<str, _>((
                    std::ops::Bound::Included(start),
                    std::ops::Bound::Included(end),
                ))
                .next()
                .is_some()
    }
}

/// The first and last date of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan<'a> {
    /// Earliest date.
    pub first: &'a str,
    /// Latest date.
    pub last: &'a str,
}

impl DateSpan<'_> {
    /// Returns `true` if the group has a single distinct date.
    #[must_use]
    pub fn is_single_day(&self) -> bool {
        self.first == self.last
    }
}

impl fmt::Display for DateSpan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_day() {
            f.write_str(self.first)
        } else {
            write!(f, "{} – {}", self.first, self.last)
        }
    }
}

/// Groups records by `(area, site)`.
///
/// Keys match exactly (case-sensitive, no trimming). Groups come out in the
/// order their key was first seen, members in register order. Records
/// missing a commune, lieu-dit or date are left out. Groups whose key is not
/// in `table` are kept, without a coordinate.
#[must_use]
pub fn aggregate(records: &[Record], table: &CoordinateTable) -> Vec<LocationGroup> {
    let mut index: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    let mut members: Vec<Vec<&Record>> = Vec::new();
    let mut dropped = 0usize;

    for record in records {
        if !record.is_groupable() {
            dropped += 1;
            continue;
        }

        let key = (record.area.as_str(), record.site.as_str());
        let idx = *index.entry(key).or_insert_with(|| {
            members.push(Vec::new());
            members.len() - 1
        });
        members[idx].push(record);
    }

    if dropped > 0 {
        log::debug!("Left {dropped} record(s) without commune, lieu-dit or date out of grouping");
    }

    let groups: Vec<LocationGroup> = members.into_iter().map(|m| build_group(&m, table)).collect();

    let unresolved = groups.iter().filter(|g| !g.is_renderable()).count();
    log::debug!(
        "Aggregated {} records into {} locations ({unresolved} without coordinates)",
        records.len() - dropped,
        groups.len()
    );

    groups
}

fn build_group(members: &[&Record], table: &CoordinateTable) -> LocationGroup {
    let first = members[0];
    let area = first.area.clone();
    let site = first.site.clone();

    let dates = members.iter().map(|r| r.date.clone()).collect();
    let category = classify(members.iter().map(|r| r.status.as_str()));
    let coordinate = table.lookup(&area, &site);

    LocationGroup {
        area,
        site,
        records: members.iter().map(|r| (*r).clone()).collect(),
        dates,
        coordinate,
        category,
    }
}

/// A location that still needs geocoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedLocation {
    /// Commune name.
    pub area: String,
    /// Lieu-dit name.
    pub site: String,
    /// Number of records at this location.
    pub count: usize,
}

impl UnresolvedLocation {
    /// A `[[location]]` TOML row to paste into the coordinate table.
    #[must_use]
    pub fn stub(&self) -> String {
        location_stub(&self.area, &self.site)
    }
}

/// Lists groups without a coordinate, most records first.
///
/// Ties keep aggregation order.
#[must_use]
pub fn unresolved(groups: &[LocationGroup]) -> Vec<UnresolvedLocation> {
    let mut missing: Vec<UnresolvedLocation> = groups
        .iter()
        .filter(|g| !g.is_renderable())
        .map(|g| UnresolvedLocation {
            area: g.area.clone(),
            site: g.site.clone(),
            count: g.len(),
        })
        .collect();

    missing.sort_by_key(|m| std::cmp::Reverse(m.count));
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use memorial_map_geography::LocationEntry;

    fn record(area: &str, site: &str, name: &str, status: &str, date: &str) -> Record {
        Record::new(area, site, name, status, date)
    }

    fn table() -> CoordinateTable {
        CoordinateTable::from_entries([
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
        .unwrap()
    }

    fn sample() -> Vec<Record> {
        vec![
            record("Vizille", "La Glacière", "A", "Fusillé", "1944-08-22"),
            record("Claix", "Les Peyrouses", "B", "Mort au combat", "1944-08-21"),
            record("Vizille", "La Glacière", "C", "Victime civile", "1944-08-20"),
            record("Séchilienne", "Les Clots", "D", "Victime civile", "1944-08-22"),
            record("Vizille", "La Glacière", "E", "Fusillé", "1944-08-22"),
            record("", "Nowhere", "F", "Fusillé", "1944-08-22"),
        ]
    }

    #[test]
    fn groups_in_first_seen_order() {
        let groups = aggregate(&sample(), &table());
        let keys: Vec<(&str, &str)> = groups.iter().map(|g| (g.area(), g.site())).collect();
        assert_eq!(
            keys,
            vec![
                ("Vizille", "La Glacière"),
                ("Claix", "Les Peyrouses"),
                ("Séchilienne", "Les Clots"),
            ]
        );
    }

    #[test]
    fn members_keep_register_order_and_dates_are_distinct() {
        let groups = aggregate(&sample(), &table());
        let vizille = &groups[0];
        let names: Vec<&str> = vizille.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "E"]);
        assert_eq!(
            vizille.dates().iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["1944-08-20", "1944-08-22"]
        );
    }

    #[test]
    fn every_groupable_record_lands_in_exactly_one_group() {
        let records = sample();
        let groups = aggregate(&records, &table());

        let grouped: usize = groups.iter().map(LocationGroup::len).sum();
        let groupable = records.iter().filter(|r| r.is_groupable()).count();
        assert_eq!(grouped, groupable);

        for r in records.iter().filter(|r| r.is_groupable()) {
            let holders = groups
                .iter()
                .filter(|g| g.records().contains(r))
                .count();
            assert_eq!(holders, 1, "{r:?} should be in exactly one group");
        }
    }

    #[test]
    fn aggregation_is_repeatable() {
        let records = sample();
        assert_eq!(aggregate(&records, &table()), aggregate(&records, &table()));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let records = vec![
            record("Vizille", "La Glacière", "A", "Fusillé", "1944-08-22"),
            record("vizille", "La Glacière", "B", "Fusillé", "1944-08-22"),
        ];
        let groups = aggregate(&records, &table());
        assert_eq!(groups.len(), 2);
        assert!(groups[0].is_renderable());
        assert!(!groups[1].is_renderable());
    }

    #[test]
    fn unresolved_groups_are_kept_without_coordinate() {
        let groups = aggregate(&sample(), &table());
        let sechilienne = &groups[2];
        assert_eq!(sechilienne.coordinate(), None);
        assert!(!sechilienne.is_renderable());
        assert_eq!(
            groups[1].coordinate(),
            Some(Coordinate::new(45.138, 5.6675))
        );
    }

    #[test]
    fn group_category_uses_all_members() {
        let groups = aggregate(&sample(), &table());
        // Fusillé + Victime civile + Fusillé: civilian beats the fallback.
        assert_eq!(groups[0].category(), Category::Civilians);
        assert_eq!(groups[1].category(), Category::Combats);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(aggregate(&[], &table()).is_empty());
    }

    #[test]
    fn date_span_display() {
        let groups = aggregate(&sample(), &table());
        assert_eq!(
            groups[0].date_span().unwrap().to_string(),
            "1944-08-20 – 1944-08-22"
        );
        let single = groups[1].date_span().unwrap();
        assert!(single.is_single_day());
        assert_eq!(single.to_string(), "1944-08-21");
    }

    #[test]
    fn date_window_is_inclusive() {
        let groups = aggregate(&sample(), &table());
        let claix = &groups[1];
        assert!(claix.has_date_between("1944-08-21", "1944-08-31"));
        assert!(claix.has_date_between("1944-08-01", "1944-08-21"));
        assert!(!claix.has_date_between("1944-08-22", "1944-08-31"));
        assert!(!claix.has_date_between("1944-08-01", "1944-08-20"));
        assert!(!claix.has_date_between("1944-08-31", "1944-08-01"));
    }

    #[test]
    fn unresolved_sorted_by_count() {
        let records = vec![
            record("A", "one", "1", "Fusillé", "1944-08-22"),
            record("B", "two", "2", "Fusillé", "1944-08-22"),
            record("B", "two", "3", "Fusillé", "1944-08-22"),
            record("C", "three", "4", "Fusillé", "1944-08-22"),
            record("Claix", "Les Peyrouses", "5", "Fusillé", "1944-08-22"),
        ];
        let groups = aggregate(&records, &table());
        let missing = unresolved(&groups);
        let keys: Vec<(&str, usize)> = missing.iter().map(|m| (m.area.as_str(), m.count)).collect();
        assert_eq!(keys, vec![("B", 2), ("A", 1), ("C", 1)]);
        assert!(missing[0].stub().contains("site = \"two\""));
    }
}
