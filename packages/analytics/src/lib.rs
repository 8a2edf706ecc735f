#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Statistics aggregator.
//!
//! Works on flat records, not on location groups: each record is classified
//! from its own status alone. A group's category looks at all of its
//! members, so the per-category totals here can differ from what the map
//! markers suggest. Both views are kept as they are.

use std::collections::{BTreeMap, BTreeSet};

pub use memorial_map_analytics_models::{
    AreaCount, CategoryCount, DateCount, StatsSnapshot, StatusCount,
};
use memorial_map_location::LocationGroup;
use memorial_map_record::classify::classify_record;
use memorial_map_record::{Category, Record};

/// Computes the summary statistics of `records`.
#[must_use]
pub fn summarize(records: &[Record]) -> StatsSnapshot {
    summarize_iter(records)
}

/// [`summarize`] over the members of `groups`.
///
/// Passing the visible groups gives the statistics of the filtered set.
/// Records that were never grouped are not counted.
#[must_use]
pub fn summarize_groups<'a>(groups: impl IntoIterator<Item = &'a LocationGroup>) -> StatsSnapshot {
    summarize_iter(groups.into_iter().flat_map(LocationGroup::records))
}

fn summarize_iter<'a>(records: impl IntoIterator<Item = &'a Record>) -> StatsSnapshot {
    let mut total = 0u64;
    let mut per_category: BTreeMap<_, u64> = BTreeMap::new();
    let mut dates: BTreeSet<&str> = BTreeSet::new();
    let mut areas = Tally::default();

    for record in records {
        total += 1;
        *per_category.entry(classify_record(record)).or_default() += 1;
        dates.insert(&record.date);
        areas.add(&record.area);
    }

    let per_category = Category::all()
        .iter()
        .map(|&category| CategoryCount {
            category,
            count: per_category.get(&category).copied().unwrap_or(0),
        })
        .collect();

    let areas = areas.most_first();
    let distinct_areas = areas.len() as u64;

    log::debug!("Summarized {total} records over {distinct_areas} communes");

    StatsSnapshot {
        total,
        per_category,
        distinct_areas,
        distinct_dates: dates.len() as u64,
        per_area: areas
            .into_iter()
            .map(|(area, count)| AreaCount {
                area: area.to_string(),
                count,
            })
            .collect(),
    }
}

/// Records per date, oldest first.
#[must_use]
pub fn by_date(records: &[Record]) -> Vec<DateCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *counts.entry(&record.date).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(date, count)| DateCount {
            date: date.to_string(),
            count,
        })
        .collect()
}

/// Records per raw status string, most first. Ties keep first-seen order.
#[must_use]
pub fn by_status(records: &[Record]) -> Vec<StatusCount> {
    let mut tally = Tally::default();
    for record in records {
        tally.add(&record.status);
    }
    tally
        .most_first()
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect()
}

/// Distinct communes in alphabetical order with their record counts.
///
/// These are the commune filter options.
#[must_use]
pub fn area_options(records: &[Record]) -> Vec<AreaCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records.iter().filter(|r| !r.area.is_empty()) {
        *counts.entry(&record.area).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(area, count)| AreaCount {
            area: area.to_string(),
            count,
        })
        .collect()
}

/// Counts keys, remembering the order they were first seen in.
#[derive(Default)]
struct Tally<'a> {
    index: BTreeMap<&'a str, usize>,
    counts: Vec<(&'a str, u64)>,
}

impl<'a> Tally<'a> {
    fn add(&mut self, key: &'a str) {
        let idx = *self.index.entry(key).or_insert_with(|| {
            self.counts.push((key, 0));
            self.counts.len() - 1
        });
        self.counts[idx].1 += 1;
    }

    /// Descending by count. The sort is stable.
    fn most_first(mut self) -> Vec<(&'a str, u64)> {
        self.counts.sort_by_key(|&(_, count)| std::cmp::Reverse(count));
        self.counts
    }
}
