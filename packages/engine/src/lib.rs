#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The memorial map engine.
//!
//! [`MapEngine`] owns the loaded register and the location groups built
//! from it. Aggregation runs once, in the constructor; every query after
//! that borrows the same immutable group set, so no query can run before
//! aggregation and no query can observe the result of a previous one.

pub mod config;

pub use config::{CONFIG_ENV_VAR, ConfigError, MapConfig};

use memorial_map_analytics::{AreaCount, StatsSnapshot};
use memorial_map_filter::FilterSpec;
use memorial_map_geography::{CoordinateTable, GeographyError};
use memorial_map_location::{LocationGroup, UnresolvedLocation, aggregate};
use memorial_map_record::{RecordError, RecordStore};
use thiserror::Error;

/// Errors that can occur while loading the engine's inputs.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The register could not be loaded.
    #[error("Failed to load records: {0}")]
    Record(#[from] RecordError),

    /// The coordinate table could not be loaded.
    #[error("Failed to load coordinates: {0}")]
    Geography(#[from] GeographyError),
}

/// Loaded register plus its location groups.
#[derive(Debug, Clone)]
pub struct MapEngine {
    store: RecordStore,
    groups: Vec<LocationGroup>,
}

impl MapEngine {
    /// Aggregates `store` against `table`.
    #[must_use]
    pub fn new(store: RecordStore, table: &CoordinateTable) -> Self {
        let groups = aggregate(store.records(), table);

        log::info!(
            "Map engine ready: {} records, {} locations ({} unresolved)",
            store.len(),
            groups.len(),
            groups.iter().filter(|g| !g.is_renderable()).count()
        );

        Self { store, groups }
    }

    /// Loads the register and coordinate table named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if either input cannot be loaded.
    pub fn load(config: &MapConfig) -> Result<Self, EngineError> {
        let table = match &config.data.coordinates {
            Some(path) => CoordinateTable::load(path)?,
            None => CoordinateTable::builtin(),
        };
        let store = RecordStore::load(&config.data.records)?;
        Ok(Self::new(store, &table))
    }

    /// The register.
    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    /// All location groups, in first-seen order.
    #[must_use]
    pub fn groups(&self) -> &[LocationGroup] {
        &self.groups
    }

    /// Groups passing `spec`, coordinate or not.
    #[must_use]
    pub fn visible(&self, spec: &FilterSpec) -> Vec<&LocationGroup> {
        memorial_map_filter::visible(&self.groups, spec)
    }

    /// Groups passing `spec` that can be drawn.
    #[must_use]
    pub fn renderable(&self, spec: &FilterSpec) -> Vec<&LocationGroup> {
        memorial_map_filter::renderable(&self.groups, spec)
    }

    /// Every group with whether it passes `spec`.
    #[must_use]
    pub fn passes(&self, spec: &FilterSpec) -> Vec<(&LocationGroup, bool)> {
        self.groups
            .iter()
            .map(|g| (g, memorial_map_filter::passes(g, spec)))
            .collect()
    }

    /// Statistics over every record, grouped or not. Computed on each call.
    #[must_use]
    pub fn statistics(&self) -> StatsSnapshot {
        memorial_map_analytics::summarize(self.store.records())
    }

    /// Statistics over the members of the groups passing `spec`.
    #[must_use]
    pub fn filtered_statistics(&self, spec: &FilterSpec) -> StatsSnapshot {
        memorial_map_analytics::summarize_groups(self.visible(spec))
    }

    /// Commune filter options with record counts.
    #[must_use]
    pub fn area_options(&self) -> Vec<AreaCount> {
        memorial_map_analytics::area_options(self.store.records())
    }

    /// Groups still missing a coordinate, most records first.
    #[must_use]
    pub fn unresolved(&self) -> Vec<UnresolvedLocation> {
        memorial_map_location::unresolved(&self.groups)
    }

    /// GeoJSON `FeatureCollection` of the groups to draw under `spec`.
    #[must_use]
    pub fn geojson(&self, spec: &FilterSpec) -> serde_json::Value {
        memorial_map_generate::feature_collection(self.renderable(spec))
    }
}
