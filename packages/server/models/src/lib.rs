#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the memorial map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the engine's types to allow independent evolution of the API
//! contract.

use memorial_map_geography_models::MapView;
use memorial_map_record_models::Category;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Error body returned with 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

/// Filter query parameters shared by `/locations` and `/stats/filtered`.
///
/// Lists are comma-separated. An absent parameter keeps the default; an
/// empty `categories` hides everything and an empty `areas` lifts the
/// commune restriction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationQueryParams {
    /// Category names (`executions`, `combats`, `civilians`).
    pub categories: Option<String>,
    /// Commune names.
    pub areas: Option<String>,
    /// Inclusive start date (`YYYY-MM-DD`).
    pub from: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`).
    pub to: Option<String>,
}

/// One category with its per-record count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategoryCount {
    /// Category identifier.
    pub name: Category,
    /// Display label.
    pub label: String,
    /// Number of records.
    pub count: u64,
}

/// Default filter as exposed to the front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFilterDefaults {
    /// Selected categories.
    pub categories: Vec<Category>,
    /// Selected communes (empty means all).
    pub areas: Vec<String>,
    /// Inclusive start date.
    pub date_start: String,
    /// Inclusive end date.
    pub date_end: String,
}

/// Map settings and default filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Initial center as `[lat, lon]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
    /// Name of the view fitted on load.
    pub initial_view: String,
    /// Named predefined extents.
    pub views: Vec<MapView>,
    /// Filter applied on load and on reset.
    pub default_filter: ApiFilterDefaults,
}
