#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Immutable victim record store.
//!
//! Records are parsed once from the register CSV into a [`RecordStore`] and
//! never change afterwards. The store is the input of both the location
//! aggregator and the statistics aggregator; it keeps rows that cannot be
//! grouped so that totals stay accurate.

pub mod classify;
pub mod validate;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

pub use memorial_map_record_models::{Category, Record};

/// Errors that can occur while loading the register.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// I/O error (file open/read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// The loaded register. Cheap to clone; the rows are shared.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<[Record]>,
}

impl RecordStore {
    /// Wraps already-parsed records.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Parses a header-driven CSV register.
    ///
    /// Columns are matched by header name, so their order does not matter.
    /// Missing columns and short rows yield empty fields; blank lines are
    /// skipped. Field values are kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Csv`] if the input is not valid CSV.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RecordError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = Columns::from_headers(reader.headers()?);
        let records = reader
            .records()
            .map(|row| row.map(|row| columns.extract(&row)))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Parsed {} records", records.len());

        Ok(Self::new(records))
    }

    /// Reads and parses the register at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the file cannot be opened or parsed.
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        log::info!("Loading records from {}", path.display());
        let file = std::fs::File::open(path)?;
        let store = Self::from_reader(std::io::BufReader::new(file))?;
        log::info!("Loaded {} records", store.len());
        Ok(store)
    }

    /// All records in file order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates over the records in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records, including ones that cannot be grouped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the register is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Positions of the register columns within a CSV header row.
struct Columns {
    area: Option<usize>,
    site: Option<usize>,
    name: Option<usize>,
    status: Option<usize>,
    date: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h == name);
        Self {
            area: position("commune"),
            site: position("lieu_dit"),
            name: position("nom"),
            status: position("statut"),
            date: position("date"),
        }
    }

    fn extract(&self, row: &csv::StringRecord) -> Record {
        let field = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .unwrap_or_default()
                .to_string()
        };
        Record {
            area: field(self.area),
            site: field(self.site),
            name: field(self.name),
            status: field(self.status),
            date: field(self.date),
        }
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
