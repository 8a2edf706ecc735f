#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate and map view types.
//!
//! Sites are geocoded by hand into a static table keyed by
//! `(commune, lieu_dit)`. These types describe the rows of that table and
//! the predefined map views handed to the front-end.

use serde::{Deserialize, Serialize};

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

impl Coordinate {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns `true` if both components are finite and within WGS84 bounds.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// One row of the coordinate table file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    /// Commune name, matched exactly against `Record::area`.
    pub area: String,
    /// Lieu-dit name, matched exactly against `Record::site`.
    pub site: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

impl LocationEntry {
    /// The entry's point.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// A named, predefined map extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Display name (e.g. "Basse Romanche").
    pub name: String,
    /// South-west corner as `[lat, lon]`.
    #[serde(alias = "south_west")]
    pub south_west: [f64; 2],
    /// North-east corner as `[lat, lon]`.
    #[serde(alias = "north_east")]
    pub north_east: [f64; 2],
}

impl MapView {
    /// Returns `true` if `point` lies inside this view (edges included).
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south_west[0]..=self.north_east[0]).contains(&point.lat)
            && (self.south_west[1]..=self.north_east[1]).contains(&point.lon)
    }
}
