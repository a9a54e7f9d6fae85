//! Lifestyle recommendations keyed by age group, lifestyle and concern.
//!
//! The recommendation table is coarser than the plan table: ages fall into
//! one of two fixed groups, and rows carry whatever advice columns the
//! author chose to add alongside the three key columns.

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::table::{self, TableError};

pub const REQUIRED_COLUMNS: &[&str] = &["age_range", "lifestyle", "health_concern"];

/// Age at which the older group starts.
pub const OLDER_GROUP_START: i64 = 45;

/// One recommendation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationRow {
    pub age_range: String,
    pub lifestyle: String,
    pub health_concern: String,
    /// Remaining columns in header order.
    pub details: Vec<(String, String)>,
}

/// Age group label used as the `age_range` key.
pub fn age_group(age: i64) -> &'static str {
    if age < OLDER_GROUP_START {
        "35-45"
    } else {
        "45-55"
    }
}

pub fn load_recommendations(path: &Path) -> Result<Vec<RecommendationRow>, TableError> {
    let file = table::open(path)?;
    tracing::debug!(path = %path.display(), "loading recommendation table");
    read_recommendations(file)
}

pub fn read_recommendations<R: Read>(reader: R) -> Result<Vec<RecommendationRow>, TableError> {
    let mut rdr = table::csv_reader(reader);
    let headers = rdr.headers()?.clone();
    table::require_columns(&headers, REQUIRED_COLUMNS)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        table::check_width(&record, &headers)?;
        let mut row = RecommendationRow {
            age_range: String::new(),
            lifestyle: String::new(),
            health_concern: String::new(),
            details: Vec::new(),
        };
        for (column, value) in headers.iter().zip(record.iter()) {
            match column {
                "age_range" => row.age_range = value.to_string(),
                "lifestyle" => row.lifestyle = value.to_string(),
                "health_concern" => row.health_concern = value.to_string(),
                _ => row.details.push((column.to_string(), value.to_string())),
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

/// First row for the age group of `age` whose lifestyle and concern equal
/// the inputs, ignoring case.
pub fn recommend<'a>(
    rows: &'a [RecommendationRow],
    age: i64,
    lifestyle: &str,
    concern: &str,
) -> Option<&'a RecommendationRow> {
    let group = age_group(age);
    let lifestyle = lifestyle.to_lowercase();
    let concern = concern.to_lowercase();
    rows.iter().find(|row| {
        row.age_range == group
            && row.lifestyle.to_lowercase() == lifestyle
            && row.health_concern.to_lowercase() == concern
    })
}

/// Load the table at `path` and look up a recommendation. Load errors are
/// logged and reported as no recommendation.
pub fn recommend_from(
    path: &Path,
    age: i64,
    lifestyle: &str,
    concern: &str,
) -> Option<RecommendationRow> {
    match load_recommendations(path) {
        Ok(rows) => recommend(&rows, age, lifestyle, concern).cloned(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "recommendation lookup failed");
            None
        }
    }
}
