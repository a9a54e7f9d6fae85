//! Diet plan table: CSV loading and table-wide inspection.
//!
//! The table is read fresh for every query and never written back. Loading
//! validates only the header (the `goal` and `age_range` columns must be
//! present); per-row interpretation is left to the matcher so that a bad
//! cell disqualifies one row instead of the whole file.

pub mod format;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::matcher::fields::{parse_alternatives, parse_macros};
use crate::matcher::normalize_goal;

pub use format::{AgeRange, AgeRangeError, PlanRecord, REQUIRED_COLUMNS};

/// Errors raised while reading a plan (or recommendation) table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to open table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("table is missing required column {0:?}")]
    MissingColumn(String),

    #[error("line {line} has {found} fields but the header has {expected}")]
    ExtraFields {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// Load the plan table at `path`.
pub fn load_table(path: &Path) -> Result<Vec<PlanRecord>, TableError> {
    let file = open(path)?;
    tracing::debug!(path = %path.display(), "loading plan table");
    read_table(file)
}

/// Read a plan table from any reader. The first line must be the header.
///
/// Short rows are padded: their missing trailing cells read as empty. Rows
/// with more fields than the header fail the load.
pub fn read_table<R: Read>(reader: R) -> Result<Vec<PlanRecord>, TableError> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers()?.clone();
    require_columns(&headers, REQUIRED_COLUMNS)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        check_width(&record, &headers)?;
        let mut row: PlanRecord = record.deserialize(Some(&headers))?;
        row.line = record_line(&record);
        rows.push(row);
    }
    Ok(rows)
}

pub(crate) fn open(path: &Path) -> Result<File, TableError> {
    File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader)
}

pub(crate) fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

/// Reject a record wider than the header.
pub(crate) fn check_width(
    record: &csv::StringRecord,
    headers: &csv::StringRecord,
) -> Result<(), TableError> {
    if record.len() > headers.len() {
        return Err(TableError::ExtraFields {
            line: record_line(record),
            expected: headers.len(),
            found: record.len(),
        });
    }
    Ok(())
}

pub(crate) fn require_columns(
    headers: &csv::StringRecord,
    required: &[&str],
) -> Result<(), TableError> {
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(TableError::MissingColumn((*column).to_string()));
        }
    }
    Ok(())
}

/// A goal present in the table along with the age ranges it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalSummary {
    /// Normalized goal key.
    pub goal: String,
    /// Raw age range cells in table order.
    pub age_ranges: Vec<String>,
}

/// Distinct goals in first-seen order, keyed by their normalized form.
pub fn goals(rows: &[PlanRecord]) -> Vec<GoalSummary> {
    let mut summaries: Vec<GoalSummary> = Vec::new();
    for row in rows {
        let goal = normalize_goal(&row.goal);
        match summaries.iter_mut().find(|s| s.goal == goal) {
            Some(summary) => summary.age_ranges.push(row.age_range.clone()),
            None => summaries.push(GoalSummary {
                goal,
                age_ranges: vec![row.age_range.clone()],
            }),
        }
    }
    summaries
}

/// A problem found in a single table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIssue {
    pub line: u64,
    pub message: String,
}

/// Inspect every row for cells the matcher would skip or reject.
///
/// Rows flagged here never produce a plan: blank goals match nothing, bad or
/// inverted age ranges contain no age, and macro/alternative cells with an
/// ambiguous pair cause the matched row to be dropped.
pub fn check(rows: &[PlanRecord]) -> Vec<TableIssue> {
    let mut issues = Vec::new();
    let mut push = |line: u64, message: String| issues.push(TableIssue { line, message });

    for row in rows {
        if normalize_goal(&row.goal).is_empty() {
            push(row.line, "goal is blank".to_string());
        }
        match row.age_range.parse::<AgeRange>() {
            Ok(range) if range.is_inverted() => {
                push(row.line, format!("age range {range} is inverted"));
            }
            Ok(_) => {}
            Err(e) => push(row.line, format!("age range: {e}")),
        }
        if let Err(e) = parse_macros(&row.macros) {
            push(row.line, format!("macros: {e}"));
        }
        if let Err(e) = parse_alternatives(&row.alternatives) {
            push(row.line, format!("alternatives: {e}"));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "goal,age_range,breakfast,lunch,dinner,snacks,macros,alternatives\n";

    #[test]
    fn reads_rows_with_line_numbers() {
        let csv = format!(
            "{HEADER}Weight Loss,35-44,Poha,Salad,Soup,Nuts,\"Protein:20g,Carbs:50g\",Breakfast:Oats\n\
             Bone Health,45-55,Ragi,Curd rice,Salmon,Figs,,\n"
        );
        let rows = read_table(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].goal, "Weight Loss");
        assert_eq!(rows[0].macros, "Protein:20g,Carbs:50g");
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].line, 3);
        assert_eq!(rows[1].macros, "");
    }

    #[test]
    fn optional_columns_default_to_empty() {
        let csv = "goal,age_range\nWeight Loss,35-44\n";
        let rows = read_table(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].breakfast, "");
        assert_eq!(rows[0].alternatives, "");
    }

    #[test]
    fn header_whitespace_is_ignored() {
        let csv = " goal , age_range ,breakfast\nWeight Loss,35-44,Poha\n";
        let rows = read_table(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].breakfast, "Poha");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "goal,age_range,notes\nWeight Loss,35-44,keep it simple\n";
        let rows = read_table(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_goal_column_is_rejected() {
        let csv = "age_range,breakfast\n35-44,Poha\n";
        let err = read_table(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(err, TableError::MissingColumn(ref c) if c == "goal"),
            "expected MissingColumn, got: {err}"
        );
    }

    #[test]
    fn short_row_is_padded_with_empty_cells() {
        let csv = format!(
            "{HEADER}Weight Loss,35-44,Poha,Salad,Soup,Nuts,Protein:20g,Breakfast:Oats\n\
             Bone Health,45-55,Ragi,Curd rice,Salmon,Figs,Protein:10g\n"
        );
        let rows = read_table(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].macros, "Protein:10g");
        assert_eq!(rows[1].alternatives, "");
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn long_row_fails_the_load() {
        let csv = "goal,age_range\nWeight Loss,35-44\nBone Health,45-55,surplus\n";
        let err = read_table(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(
                err,
                TableError::ExtraFields {
                    line: 3,
                    expected: 2,
                    found: 3
                }
            ),
            "got: {err}"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_table(Path::new("/nonexistent/plans.csv")).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }), "got: {err}");
    }

    #[test]
    fn goals_are_grouped_in_first_seen_order() {
        let csv = "goal,age_range\nWeight Loss,35-44\nBone Health,35-44\n weight loss ,45-55\n";
        let rows = read_table(csv.as_bytes()).unwrap();
        let summaries = goals(&rows);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].goal, "weight loss");
        assert_eq!(summaries[0].age_ranges, vec!["35-44", "45-55"]);
        assert_eq!(summaries[1].goal, "bone health");
    }

    #[test]
    fn check_reports_bad_rows() {
        let csv = format!(
            "{HEADER}Weight Loss,35-44,a,b,c,d,Protein:20g,Breakfast:Oats\n\
             ,35-44,a,b,c,d,,\n\
             Bone Health,adult,a,b,c,d,,\n\
             Bone Health,55-45,a,b,c,d,,\n\
             Iron Deficiency,35-44,a,b,c,d,Protein:2:0g,\n"
        );
        let rows = read_table(csv.as_bytes()).unwrap();
        let issues = check(&rows);
        let lines: Vec<u64> = issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
        assert!(issues[0].message.contains("blank"));
        assert!(issues[2].message.contains("inverted"));
        assert!(issues[3].message.starts_with("macros"));
    }

    #[test]
    fn check_passes_clean_table() {
        let rows = read_table(crate::presets::starter_table().as_bytes()).unwrap();
        assert!(check(&rows).is_empty());
    }
}
