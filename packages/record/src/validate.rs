//! Advisory validation of loaded records.
//!
//! Validation never removes anything from the store. It reports rows that
//! will be left out of location grouping or that look wrong, so the register
//! can be fixed at the source.

use std::fmt;

use chrono::NaiveDate;
use memorial_map_record_models::Record;

/// Required register columns, in the order they are checked.
pub const REQUIRED_FIELDS: &[&str] = &["commune", "lieu_dit", "date", "nom", "statut"];

/// What is wrong with a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// A required column is empty or absent.
    MissingField {
        /// CSV header of the missing column.
        field: &'static str,
    },
    /// The date is present but not a valid `YYYY-MM-DD` calendar date.
    InvalidDate {
        /// The offending value.
        value: String,
    },
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// 1-based data row number (the header row is not counted).
    pub row: usize,
    /// What is wrong.
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::MissingField { field } => {
                write!(f, "row {}: missing field '{field}'", self.row)
            }
            IssueKind::InvalidDate { value } => {
                write!(f, "row {}: invalid date format ({value})", self.row)
            }
        }
    }
}

/// Checks every record for empty required fields and malformed dates.
#[must_use]
pub fn validate(records: &[Record]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let row = i + 1;

        for field in REQUIRED_FIELDS {
            if field_value(record, field).is_empty() {
                issues.push(ValidationIssue {
                    row,
                    kind: IssueKind::MissingField { field },
                });
            }
        }

        if !record.date.is_empty() && !is_iso_date(&record.date) {
            issues.push(ValidationIssue {
                row,
                kind: IssueKind::InvalidDate {
                    value: record.date.clone(),
                },
            });
        }
    }

    if !issues.is_empty() {
        log::debug!("Validation found {} issue(s)", issues.len());
    }

    issues
}

/// Returns `true` if `s` is a valid calendar date in `YYYY-MM-DD` form.
#[must_use]
pub fn is_iso_date(s: &str) -> bool {
    s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn field_value<'a>(record: &'a Record, field: &str) -> &'a str {
    match field {
        "commune" => &record.area,
        "lieu_dit" => &record.site,
        "nom" => &record.name,
        "statut" => &record.status,
        "date" => &record.date,
        _ => "",
    }
}
