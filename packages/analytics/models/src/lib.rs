#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types of the statistics aggregator.
//!
//! Every type serializes to camelCase JSON so the server can hand them to
//! the front-end unchanged.

use memorial_map_record_models::Category;
use serde::{Deserialize, Serialize};

/// Aggregate counts over a set of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Number of records.
    pub total: u64,
    /// One row per category, in [`Category::all`] order, zeros included.
    pub per_category: Vec<CategoryCount>,
    /// Number of distinct communes.
    pub distinct_areas: u64,
    /// Number of distinct dates.
    pub distinct_dates: u64,
    /// Records per commune, most first. Ties keep first-seen order.
    pub per_area: Vec<AreaCount>,
}

impl StatsSnapshot {
    /// Count for one category.
    #[must_use]
    pub fn category_count(&self, category: Category) -> u64 {
        self.per_category
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }
}

/// Records in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// The category.
    pub category: Category,
    /// Number of records.
    pub count: u64,
}

/// Records in one commune.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaCount {
    /// Commune name.
    pub area: String,
    /// Number of records.
    pub count: u64,
}

/// Records on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateCount {
    /// ISO date.
    pub date: String,
    /// Number of records.
    pub count: u64,
}

/// Records sharing one raw status string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    /// Status as written in the register.
    pub status: String,
    /// Number of records.
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_camel_case() {
        let snapshot = StatsSnapshot {
            total: 2,
            per_category: vec![CategoryCount {
                category: Category::Combats,
                count: 2,
            }],
            distinct_areas: 1,
            distinct_dates: 1,
            per_area: vec![AreaCount {
                area: "Vizille".to_string(),
                count: 2,
            }],
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["perCategory"][0]["category"], "combats");
        assert_eq!(json["distinctAreas"], 1);
        assert_eq!(json["perArea"][0]["area"], "Vizille");
    }

    #[test]
    fn missing_category_counts_as_zero() {
        let snapshot = StatsSnapshot::default();
        assert_eq!(snapshot.category_count(Category::Civilians), 0);
    }
}
