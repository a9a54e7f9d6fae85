//! Plan matching: pick the first table row for a goal and age.
//!
//! A row matches when its normalized goal equals the normalized query goal
//! and its age range contains the query age (inclusive). The first matching
//! row in table order wins; there is no scoring and no fuzzy fallback. Rows
//! whose age range does not parse are skipped.
//!
//! [`match_plan`] never fails: a missing or malformed table, or a matched row
//! whose list cells cannot be parsed, is logged and reported as no plan.
//! [`try_match_plan`] exposes those errors for callers that want to report
//! them.

pub mod fields;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::table::{self, PlanRecord, TableError};
use fields::{FieldError, FieldMap, parse_alternatives, parse_macros};

/// Placeholder shown for an empty meal cell.
pub const MISSING_MEAL: &str = "N/A";

#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("plan on line {line} is malformed: {source}")]
    Field {
        line: u64,
        #[source]
        source: FieldError,
    },
}

/// A matched plan, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanResult {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub snacks: String,
    pub macros: FieldMap,
    pub alternatives: FieldMap,
}

impl PlanResult {
    /// Shape a raw table row. Fails when a macro or alternative cell holds
    /// an ambiguous pair.
    pub fn from_record(record: &PlanRecord) -> Result<Self, FieldError> {
        Ok(Self {
            breakfast: meal(&record.breakfast),
            lunch: meal(&record.lunch),
            dinner: meal(&record.dinner),
            snacks: meal(&record.snacks),
            macros: parse_macros(&record.macros)?,
            alternatives: parse_alternatives(&record.alternatives)?,
        })
    }
}

fn meal(cell: &str) -> String {
    if cell.trim().is_empty() {
        MISSING_MEAL.to_string()
    } else {
        cell.to_string()
    }
}

/// Trim and lowercase a goal for comparison.
pub fn normalize_goal(goal: &str) -> String {
    goal.trim().to_lowercase()
}

/// First row whose goal and age range admit the query.
pub fn find_row<'a>(rows: &'a [PlanRecord], goal: &str, age: i64) -> Option<&'a PlanRecord> {
    let goal = normalize_goal(goal);
    rows.iter()
        .filter(|row| normalize_goal(&row.goal) == goal)
        .find(|row| row.age_bounds().is_some_and(|range| range.contains(age)))
}

/// Match against rows already in memory. Shaping errors are logged and
/// reported as no plan.
pub fn match_in(rows: &[PlanRecord], goal: &str, age: i64) -> Option<PlanResult> {
    let row = find_row(rows, goal, age)?;
    match PlanResult::from_record(row) {
        Ok(plan) => Some(plan),
        Err(e) => {
            tracing::warn!(line = row.line, error = %e, "matched plan row is malformed");
            None
        }
    }
}

/// Load the table at `path` and match `goal`/`age` against it, surfacing
/// load and shaping errors.
pub fn try_match_plan(
    path: &Path,
    goal: &str,
    age: i64,
) -> Result<Option<PlanResult>, MatchError> {
    let rows = table::load_table(path)?;
    let Some(row) = find_row(&rows, goal, age) else {
        tracing::debug!(goal, age, "no plan row matched");
        return Ok(None);
    };
    tracing::debug!(goal, age, line = row.line, "plan row matched");
    PlanResult::from_record(row)
        .map(Some)
        .map_err(|source| MatchError::Field {
            line: row.line,
            source,
        })
}

/// Load the table at `path` and match `goal`/`age` against it. Any error is
/// logged and reported as no plan.
pub fn match_plan(path: &Path, goal: &str, age: i64) -> Option<PlanResult> {
    match try_match_plan(path, goal, age) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "plan lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(goal: &str, age_range: &str, breakfast: &str) -> PlanRecord {
        PlanRecord {
            goal: goal.to_string(),
            age_range: age_range.to_string(),
            breakfast: breakfast.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_goal("  Weight Loss "), "weight loss");
    }

    #[test]
    fn goal_match_ignores_case_and_whitespace() {
        let rows = vec![row("weight loss", "35-44", "Poha")];
        let plan = match_in(&rows, "  Weight Loss ", 40).unwrap();
        assert_eq!(plan.breakfast, "Poha");
    }

    #[test]
    fn goal_match_is_exact_not_substring() {
        let rows = vec![row("weight loss", "35-44", "Poha")];
        assert!(match_in(&rows, "weight", 40).is_none());
        assert!(match_in(&rows, "weight loss plan", 40).is_none());
    }

    #[test]
    fn first_matching_row_wins() {
        let rows = vec![
            row("Weight Loss", "35-50", "First"),
            row("Weight Loss", "40-45", "Second"),
        ];
        assert_eq!(match_in(&rows, "weight loss", 42).unwrap().breakfast, "First");
    }

    #[test]
    fn rows_with_bad_age_range_are_skipped() {
        let rows = vec![
            row("Weight Loss", "forty", "Bad"),
            row("Weight Loss", "35-44", "Good"),
        ];
        assert_eq!(match_in(&rows, "weight loss", 40).unwrap().breakfast, "Good");
    }

    #[test]
    fn bounds_are_inclusive() {
        let rows = vec![row("Bone Health", "45-55", "Ragi")];
        assert!(match_in(&rows, "bone health", 45).is_some());
        assert!(match_in(&rows, "bone health", 55).is_some());
        assert!(match_in(&rows, "bone health", 44).is_none());
        assert!(match_in(&rows, "bone health", 56).is_none());
    }

    #[test]
    fn empty_meals_become_placeholder() {
        let rows = vec![row("Bone Health", "45-55", "")];
        let plan = match_in(&rows, "bone health", 50).unwrap();
        assert_eq!(plan.breakfast, MISSING_MEAL);
        assert_eq!(plan.snacks, MISSING_MEAL);
    }

    #[test]
    fn malformed_macros_on_matched_row_yield_none() {
        let mut bad = row("Bone Health", "45-55", "Ragi");
        bad.macros = "Protein:2:0g".to_string();
        let good = row("Bone Health", "45-55", "Curd");
        assert!(match_in(&[bad, good], "bone health", 50).is_none());
    }

    #[test]
    fn macros_keep_table_order() {
        let mut record = row("Weight Loss", "35-44", "Poha");
        record.macros = "Protein:20g,Carbs:50g,Fat:30g".to_string();
        let plan = PlanResult::from_record(&record).unwrap();
        let keys: Vec<&str> = plan.macros.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Protein", "Carbs", "Fat"]);
    }
}
