//! Starter tables embedded in the binary.
//!
//! `nutriplan init` writes these to disk so a fresh install has a plan table
//! and a recommendation table to query. Both files are embedded at compile
//! time.

use std::io;
use std::path::Path;

/// Goals offered by default, in display order.
pub const GOALS: &[&str] = &[
    "Hormonal Balance",
    "Weight Loss",
    "Iron Deficiency",
    "Digestive Health",
    "Energy Boosting",
    "Bone Health",
];

/// File name of the plan table.
pub const PLANS_FILE: &str = "predefined_diet_plans.csv";

/// File name of the recommendation table.
pub const RECOMMENDATIONS_FILE: &str = "diet_plans.csv";

static PLANS_CSV: &str = include_str!("predefined_diet_plans.csv");
static RECOMMENDATIONS_CSV: &str = include_str!("diet_plans.csv");

/// Contents of the embedded plan table.
pub fn starter_table() -> &'static str {
    PLANS_CSV
}

/// Contents of the embedded recommendation table.
pub fn starter_recommendations() -> &'static str {
    RECOMMENDATIONS_CSV
}

/// Outcome of writing a starter file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file already existed and `force` was not set.
    Kept,
}

/// Write the embedded plan table to `path`.
pub fn write_starter_table(path: &Path, force: bool) -> io::Result<WriteOutcome> {
    write_if_absent(path, PLANS_CSV, force)
}

/// Write the embedded recommendation table to `path`.
pub fn write_starter_recommendations(path: &Path, force: bool) -> io::Result<WriteOutcome> {
    write_if_absent(path, RECOMMENDATIONS_CSV, force)
}

fn write_if_absent(path: &Path, contents: &str, force: bool) -> io::Result<WriteOutcome> {
    if path.exists() && !force {
        return Ok(WriteOutcome::Kept);
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, contents)?;
    tracing::debug!(path = %path.display(), "wrote starter table");
    Ok(WriteOutcome::Written)
}
