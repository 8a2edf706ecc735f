#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static site coordinate table.
//!
//! Sites are geocoded by hand. The table lives in a TOML file of
//! `[[location]]` rows so that new sites can be added without touching the
//! aggregation code. The built-in table (`data/coordinates.toml`) is baked
//! into the binary at compile time via [`include_str!`]; a different file
//! can be loaded at runtime with [`CoordinateTable::load`].

use std::collections::BTreeMap;
use std::path::Path;

pub use memorial_map_geography_models::{Coordinate, LocationEntry, MapView};
use serde::Deserialize;
use thiserror::Error;

/// Built-in coordinate table, embedded at compile time.
const BUILTIN_TABLE: &str = include_str!("../data/coordinates.toml");

/// Errors that can occur while loading a coordinate table.
#[derive(Debug, Error)]
pub enum GeographyError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The same `(area, site)` key appears more than once.
    #[error("Duplicate location: {area} / {site}")]
    DuplicateLocation {
        /// Commune of the duplicated row.
        area: String,
        /// Lieu-dit of the duplicated row.
        site: String,
    },

    /// A row has a latitude or longitude outside WGS84 bounds.
    #[error("Invalid coordinate for {area} / {site}: ({lat}, {lon})")]
    InvalidCoordinate {
        /// Commune of the offending row.
        area: String,
        /// Lieu-dit of the offending row.
        site: String,
        /// Latitude as written.
        lat: f64,
        /// Longitude as written.
        lon: f64,
    },
}

/// On-disk layout of a coordinate table file.
#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    location: Vec<LocationEntry>,
}

/// Exact-match lookup from `(area, site)` to a [`Coordinate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateTable {
    entries: BTreeMap<(String, String), Coordinate>,
}

impl CoordinateTable {
    /// Returns the built-in table.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. Since it is a compile-time
    /// constant, a failure here is a development error caught by the tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml_str(BUILTIN_TABLE)
            .unwrap_or_else(|e| panic!("Failed to parse built-in coordinates.toml: {e}"))
    }

    /// Parses a table from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError`] if the text is not valid TOML, a key is
    /// duplicated, or a coordinate is out of range.
    pub fn from_toml_str(s: &str) -> Result<Self, GeographyError> {
        let file: TableFile = toml::de::from_str(s)?;
        Self::from_entries(file.location)
    }

    /// Reads a table from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError`] if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, GeographyError> {
        log::info!("Loading coordinate table from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&contents)?;
        log::info!("Loaded {} geocoded sites", table.len());
        Ok(table)
    }

    /// Builds a table from rows.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError`] if a key is duplicated or a coordinate is
    /// out of range.
    pub fn from_entries(
        entries: impl IntoIterator<Item = LocationEntry>,
    ) -> Result<Self, GeographyError> {
        let mut map = BTreeMap::new();

        for entry in entries {
            let coordinate = entry.coordinate();
            if !coordinate.is_valid() {
                return Err(GeographyError::InvalidCoordinate {
                    area: entry.area,
                    site: entry.site,
                    lat: entry.lat,
                    lon: entry.lon,
                });
            }

            let key = (entry.area, entry.site);
            if map.contains_key(&key) {
                let (area, site) = key;
                return Err(GeographyError::DuplicateLocation { area, site });
            }
            map.insert(key, coordinate);
        }

        Ok(Self { entries: map })
    }

    /// Looks up a site. Both parts must match exactly.
    #[must_use]
    pub fn lookup(&self, area: &str, site: &str) -> Option<Coordinate> {
        self.entries
            .get(&(area.to_string(), site.to_string()))
            .copied()
    }

    /// Number of geocoded sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no site is geocoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(area, site, coordinate)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, Coordinate)> {
        self.entries
            .iter()
            .map(|((area, site), c)| (area.as_str(), site.as_str(), *c))
    }
}

/// Renders a TOML row for a site that still needs geocoding.
///
/// The coordinates are placeholders to be filled in by hand.
#[must_use]
pub fn location_stub(area: &str, site: &str) -> String {
    format!(
        "[[location]]\narea = {}\nsite = {}\nlat = 0.0\nlon = 0.0\n",
        toml_string(area),
        toml_string(site)
    )
}

fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Number of sites in the built-in table. Update after adding sites.
    const EXPECTED_SITE_COUNT: usize = 24;

    #[test]
    fn loads_builtin_table() {
        let table = CoordinateTable::builtin();
        assert_eq!(
            table.len(),
            EXPECTED_SITE_COUNT,
            "Expected {EXPECTED_SITE_COUNT} sites, found {}. \
             Update EXPECTED_SITE_COUNT after adding/removing sites.",
            table.len()
        );
    }

    #[test]
    fn builtin_sites_are_inside_the_valley() {
        for (area, site, c) in CoordinateTable::builtin().iter() {
            assert!(
                (44.9..=45.2).contains(&c.lat) && (5.6..=6.1).contains(&c.lon),
                "{area} / {site} is outside the expected region: {c:?}"
            );
        }
    }

    #[test]
    fn lookup_is_exact() {
        let table = CoordinateTable::builtin();
        assert_eq!(
            table.lookup("Vizille", "La Glacière (domicile Bontoux)"),
            Some(Coordinate::new(45.0798, 5.7798))
        );
        assert_eq!(table.lookup("vizille", "La Glacière (domicile Bontoux)"), None);
        assert_eq!(table.lookup("Vizille", "La Glacière"), None);
        assert_eq!(table.lookup("Vizille ", "La Glacière (domicile Bontoux)"), None);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let toml = r#"
            [[location]]
            area = "Claix"
            site = "Les Peyrouses"
            lat = 45.138
            lon = 5.6675

            [[location]]
            area = "Claix"
            site = "Les Peyrouses"
            lat = 45.0
            lon = 5.0
        "#;
        let err = CoordinateTable::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, GeographyError::DuplicateLocation { .. }));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let toml = r#"
            [[location]]
            area = "Claix"
            site = "Les Peyrouses"
            lat = 5.6675
            lon = 245.138
        "#;
        let err = CoordinateTable::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, GeographyError::InvalidCoordinate { .. }));
    }

    #[test]
    fn empty_file_is_an_empty_table() {
        let table = CoordinateTable::from_toml_str("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn stub_with_control_characters_parses_back() {
        let stub = location_stub("Vizille", "La Glacière\n(bord de route)\tsud");
        let table = CoordinateTable::from_toml_str(&stub).unwrap();
        assert!(
            table
                .lookup("Vizille", "La Glacière\n(bord de route)\tsud")
                .is_some()
        );
    }

    #[test]
    fn stub_parses_back() {
        let stub = location_stub("Le Bourg-d'Oisans", "Le \"Pont\"");
        let table = CoordinateTable::from_toml_str(&stub).unwrap();
        assert_eq!(
            table.lookup("Le Bourg-d'Oisans", "Le \"Pont\""),
            Some(Coordinate::new(0.0, 0.0))
        );
    }
}
