#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! GeoJSON export of location groups.
//!
//! Each coordinate-resolved group becomes one `Point` feature carrying
//! everything the front-end needs for its marker icon, tooltip and popup.

use std::io::Write;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use memorial_map_location::LocationGroup;
use thiserror::Error;

/// Errors that can occur while writing an export.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// I/O error (file create/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Formats an ISO date as a French long date (`20 août 1944`).
///
/// Anything that is not a valid `YYYY-MM-DD` date is returned unchanged.
#[must_use]
pub fn format_date_fr(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_or_else(
        |_| date.to_string(),
        |d| format!("{} {} {}", d.day(), MONTHS_FR[d.month0() as usize], d.year()),
    )
}

/// French label for a group's date span: one date, or `first – last`.
#[must_use]
pub fn date_label(group: &LocationGroup) -> String {
    match group.date_span() {
        None => String::new(),
        Some(span) if span.is_single_day() => format_date_fr(span.first),
        Some(span) => format!(
            "{} – {}",
            format_date_fr(span.first),
            format_date_fr(span.last)
        ),
    }
}

/// Short hover text: site, victim count and dates.
#[must_use]
pub fn tooltip(group: &LocationGroup) -> String {
    format!(
        "{}\n{} victime(s) – {}",
        group.site(),
        group.len(),
        date_label(group)
    )
}

/// Builds one GeoJSON feature, or `None` if the group has no coordinate.
#[must_use]
pub fn feature(group: &LocationGroup) -> Option<serde_json::Value> {
    let coordinate = group.coordinate()?;

    let victims: Vec<&str> = group.records().iter().map(|r| r.name.as_str()).collect();
    let statuses: Vec<&str> = group.records().iter().map(|r| r.status.as_str()).collect();
    let dates: Vec<&String> = group.dates().iter().collect();

    Some(serde_json::json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [coordinate.lon, coordinate.lat]
        },
        "properties": {
            "commune": group.area(),
            "lieu_dit": group.site(),
            "category": group.category(),
            "category_label": group.category().label(),
            "victims_count": group.len(),
            "dates": dates,
            "date_label": date_label(group),
            "tooltip": tooltip(group),
            "victims": victims,
            "statuses": statuses,
        }
    }))
}

/// Builds a `FeatureCollection` of the groups that have a coordinate.
///
/// Feature order follows `groups`.
#[must_use]
pub fn feature_collection<'a>(
    groups: impl IntoIterator<Item = &'a LocationGroup>,
) -> serde_json::Value {
    let features: Vec<serde_json::Value> = groups.into_iter().filter_map(feature).collect();

    log::debug!("Built {} GeoJSON features", features.len());

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Writes `value` as pretty-printed JSON to `path`.
///
/// The file is written to a temporary sibling first and renamed into place.
/// The temporary file is removed if any step fails.
///
/// # Errors
///
/// Returns [`GenerateError`] if the file cannot be written.
pub fn write_geojson(path: &Path, value: &serde_json::Value) -> Result<(), GenerateError> {
    let tmp_path = path.with_extension("geojson.tmp");

    let result = write_pretty(&tmp_path, value)
        .and_then(|()| std::fs::rename(&tmp_path, path).map_err(GenerateError::from));
    if let Err(e) = result {
        if tmp_path.exists() {
            let _ = std::fs::remove_file(&tmp_path);
        }
        return Err(e);
    }

    log::info!("GeoJSON written: {}", path.display());
    Ok(())
}

fn write_pretty(path: &Path, value: &serde_json::Value) -> Result<(), GenerateError> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
