//! Map configuration.
//!
//! The default configuration is baked into the binary from
//! `config/default.toml`. A replacement file can be supplied at runtime.

use std::path::{Path, PathBuf};

use memorial_map_filter::{DEFAULT_DATE_END, DEFAULT_DATE_START, FilterSpec};
use memorial_map_geography::MapView;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Built-in configuration, embedded at compile time.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Environment variable naming a configuration file to use instead of the
/// built-in one.
pub const CONFIG_ENV_VAR: &str = "MEMORIAL_MAP_CONFIG";

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error (file read).
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// `initial_view` names no entry of `views`.
    #[error("Unknown initial view '{0}'")]
    UnknownView(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Input files.
    #[serde(default)]
    pub data: DataConfig,
    /// Display settings handed to the front-end.
    pub map: MapSettings,
    /// Default filter window.
    #[serde(default)]
    pub filter: FilterDefaults,
}

/// Input file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Victims register (CSV).
    pub records: PathBuf,
    /// Coordinate table (TOML). The built-in table is used when absent.
    #[serde(default)]
    pub coordinates: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            records: PathBuf::from("data/victimes.csv"),
            coordinates: None,
        }
    }
}

/// Map display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    /// Initial center as `[lat, lon]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
    /// Name of the view to fit on load.
    #[serde(alias = "initial_view")]
    pub initial_view: String,
    /// Named predefined extents.
    #[serde(default)]
    pub views: Vec<MapView>,
}

impl MapSettings {
    /// The view named by `initial_view`, if any.
    #[must_use]
    pub fn initial(&self) -> Option<&MapView> {
        self.views.iter().find(|v| v.name == self.initial_view)
    }
}

/// Default date window of the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDefaults {
    /// Inclusive start (ISO `YYYY-MM-DD`).
    #[serde(alias = "date_start")]
    pub date_start: String,
    /// Inclusive end (ISO `YYYY-MM-DD`).
    #[serde(alias = "date_end")]
    pub date_end: String,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            date_start: DEFAULT_DATE_START.to_string(),
            date_end: DEFAULT_DATE_END.to_string(),
        }
    }
}

impl MapConfig {
    /// Returns the built-in configuration.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. Since it is a compile-time
    /// constant, a failure here is a development error caught by the tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG)
            .unwrap_or_else(|e| panic!("Failed to parse built-in default.toml: {e}"))
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is invalid or `initial_view`
    /// does not name a configured view.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(s)?;
        if !config.map.views.is_empty() && config.map.initial().is_none() {
            return Err(ConfigError::UnknownView(config.map.initial_view));
        }
        Ok(config)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` if given, else the file named by
    /// [`CONFIG_ENV_VAR`], else the built-in configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the selected file cannot be loaded.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::builtin()),
        }
    }

    /// All categories, all communes, within the configured window.
    #[must_use]
    pub fn default_filter(&self) -> FilterSpec {
        FilterSpec::with_window(&self.filter.date_start, &self.filter.date_end)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
