#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Victim record and category types for the memorial map.
//!
//! A [`Record`] is one row of the victims register: a person, the place
//! (commune and lieu-dit) where they died, the date, and a free-text status.
//! [`Category`] is the closed set of marker categories derived from those
//! statuses.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One raw entry of the victims register.
///
/// Field names follow the register's CSV headers. Columns absent from the
/// source deserialize to empty strings so that a partially filled row still
/// reaches the store (and the statistics), even if it cannot be grouped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Administrative commune (the "area").
    #[serde(rename = "commune", default)]
    pub area: String,
    /// Named place within the commune (the "site").
    #[serde(rename = "lieu_dit", default)]
    pub site: String,
    /// Person name.
    #[serde(rename = "nom", default)]
    pub name: String,
    /// Free-text status (e.g. "Fusillé", "Mort au combat").
    #[serde(rename = "statut", default)]
    pub status: String,
    /// Date of death, ISO `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
}

impl Record {
    /// Creates a record from its five fields.
    #[must_use]
    pub fn new(
        area: impl Into<String>,
        site: impl Into<String>,
        name: impl Into<String>,
        status: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            area: area.into(),
            site: site.into(),
            name: name.into(),
            status: status.into(),
            date: date.into(),
        }
    }

    /// Returns `true` if the record carries everything location grouping
    /// needs: a commune, a lieu-dit and a date.
    #[must_use]
    pub fn is_groupable(&self) -> bool {
        !self.area.is_empty() && !self.site.is_empty() && !self.date.is_empty()
    }
}

/// Marker category of a location or a record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Category {
    /// Summary executions. Also the fallback when no other category matches.
    Executions,
    /// Killed in combat.
    Combats,
    /// Civilian victims.
    Civilians,
}

impl Category {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Executions, Self::Combats, Self::Civilians]
    }

    /// French display label used by the map legend and the CLI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Executions => "Exécutions",
            Self::Combats => "Combats",
            Self::Civilians => "Civils",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_roundtrip() {
        for category in Category::all() {
            let parsed: Category = category.as_ref().parse().unwrap();
            assert_eq!(parsed, *category);
        }
        assert_eq!("COMBATS".parse::<Category>().unwrap(), Category::Combats);
        assert!("civils".parse::<Category>().is_err());
    }

    #[test]
    fn groupable_requires_area_site_and_date() {
        let full = Record::new("Vizille", "Les Rivoirands", "A", "Fusillé", "1944-08-20");
        assert!(full.is_groupable());

        let no_site = Record {
            site: String::new(),
            ..full.clone()
        };
        assert!(!no_site.is_groupable());

        let no_date = Record {
            date: String::new(),
            ..full.clone()
        };
        assert!(!no_date.is_groupable());

        // Name and status are not needed for grouping.
        let anonymous = Record {
            name: String::new(),
            status: String::new(),
            ..full
        };
        assert!(anonymous.is_groupable());
    }
}
