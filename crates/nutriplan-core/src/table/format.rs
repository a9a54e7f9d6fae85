//! Record types for the diet plan table.
//!
//! [`PlanRecord`] maps one CSV row as written on disk. Every cell is kept as
//! text; interpretation (goal normalization, age bounds, macro lists) happens
//! in the matcher.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Column names every plan table must carry.
pub const REQUIRED_COLUMNS: &[&str] = &["goal", "age_range"];

/// A single row of `predefined_diet_plans.csv`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlanRecord {
    /// Source line of the row within the file (1 = header). Zero when the
    /// record did not come from a file.
    #[serde(skip)]
    pub line: u64,
    /// Health goal as written, e.g. `Weight Loss`.
    pub goal: String,
    /// Inclusive age bounds written as `<low>-<high>`.
    pub age_range: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
    pub snacks: String,
    /// Comma-separated `key:value` pairs.
    pub macros: String,
    /// Pipe-separated `key:value` pairs.
    pub alternatives: String,
}

impl PlanRecord {
    /// Parsed age bounds, or `None` when the cell is not `<int>-<int>`.
    pub fn age_bounds(&self) -> Option<AgeRange> {
        self.age_range.parse().ok()
    }
}

/// Inclusive integer age bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub low: i64,
    pub high: i64,
}

impl AgeRange {
    pub fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    /// Whether `age` lies within the bounds, both ends included.
    pub fn contains(&self, age: i64) -> bool {
        self.low <= age && age <= self.high
    }

    /// True when the lower bound exceeds the upper one. Such a range parses
    /// but can never contain an age.
    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }

    /// Midpoint of the range, rounded down. A representative age that any
    /// non-inverted range contains.
    pub fn midpoint(&self) -> i64 {
        self.low + (self.high - self.low) / 2
    }
}

/// Reasons an age range cell fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeRangeError {
    #[error("expected exactly two bounds separated by '-', got {0:?}")]
    Shape(String),

    #[error("bound {0:?} is not an integer")]
    Bound(String),
}

impl FromStr for AgeRange {
    type Err = AgeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        let [low, high] = parts.as_slice() else {
            return Err(AgeRangeError::Shape(s.to_string()));
        };
        let parse = |bound: &str| {
            bound
                .trim()
                .parse::<i64>()
                .map_err(|_| AgeRangeError::Bound(bound.to_string()))
        };
        Ok(Self::new(parse(*low)?, parse(*high)?))
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}
