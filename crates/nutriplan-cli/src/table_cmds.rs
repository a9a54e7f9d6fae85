//! `nutriplan goals` and `nutriplan check`: inspect the plan table.

use std::path::Path;

use anyhow::{Context, Result, bail};

use nutriplan_core::table;

/// List each goal in the table with the age ranges it covers.
pub fn run_goals(plans_path: &Path) -> Result<()> {
    let rows = table::load_table(plans_path)
        .with_context(|| format!("failed to load plan table {}", plans_path.display()))?;

    let summaries = table::goals(&rows);
    if summaries.is_empty() {
        println!("No goals found.");
        return Ok(());
    }

    println!("{:<30} {}", "GOAL", "AGE RANGES");
    println!("{}", "-".repeat(50));
    for summary in &summaries {
        println!("{:<30} {}", summary.goal, summary.age_ranges.join(", "));
    }
    Ok(())
}

/// Report rows that can never produce a plan. Fails if any are found.
pub fn run_check(plans_path: &Path) -> Result<()> {
    let rows = table::load_table(plans_path)
        .with_context(|| format!("failed to load plan table {}", plans_path.display()))?;

    let issues = table::check(&rows);
    if issues.is_empty() {
        println!("{}: {} rows, no issues.", plans_path.display(), rows.len());
        return Ok(());
    }

    for issue in &issues {
        println!("{}:{}: {}", plans_path.display(), issue.line, issue.message);
    }
    bail!("{} issue(s) found in {} rows", issues.len(), rows.len());
}
