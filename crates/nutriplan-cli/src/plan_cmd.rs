//! `nutriplan plan` command: show the diet plan for each requested goal.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Result, bail};
use serde::Serialize;

use nutriplan_core::matcher::{self, PlanResult};

use crate::config::ProfileSection;

/// Macro rows shown in the breakdown, in display order.
const MACRO_KEYS: &[&str] = &["Protein", "Carbs", "Fat"];
/// Alternative rows shown, in display order.
const ALTERNATIVE_KEYS: &[&str] = &["Breakfast", "Lunch", "Dinner"];

const MISSING_MACRO: &str = "N/A";
const MISSING_ALTERNATIVE: &str = "-";

/// A fully specified lookup: every goal is queried with the same age.
#[derive(Debug, PartialEq, Eq)]
pub struct PlanQuery {
    pub goals: Vec<String>,
    pub age: i64,
}

impl PlanQuery {
    /// Combine command-line values with profile defaults. Flags win; the
    /// profile only fills in what was not given.
    pub fn resolve(goals: Vec<String>, age: Option<i64>, profile: &ProfileSection) -> Result<Self> {
        let goals: Vec<String> = if goals.is_empty() {
            profile.goals.clone()
        } else {
            goals
        };
        let goals: Vec<String> = goals
            .into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();
        if goals.is_empty() {
            bail!("please select at least one health goal (--goal, or goals in the [profile] config)");
        }

        let Some(age) = age.or(profile.age) else {
            bail!("age is required (--age, or age in the [profile] config)");
        };

        Ok(Self { goals, age })
    }
}

#[derive(Debug, Serialize)]
struct GoalPlan<'a> {
    goal: &'a str,
    plan: Option<PlanResult>,
}

/// Run the plan command against the table at `plans_path`.
pub fn run_plan(plans_path: &Path, query: &PlanQuery, json: bool) -> Result<()> {
    let results: Vec<GoalPlan<'_>> = query
        .goals
        .iter()
        .map(|goal| GoalPlan {
            goal,
            plan: lookup(plans_path, goal, query.age),
        })
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &results)?;
        writeln!(out)?;
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        match &result.plan {
            Some(plan) => render_plan(&mut out, result.goal, plan)?,
            None => writeln!(
                out,
                "No plan found for goal: '{}' and your age: {}.",
                result.goal, query.age
            )?,
        }
    }
    Ok(())
}

/// Match one goal, printing any load or shaping error to stderr before
/// reporting it as no plan.
fn lookup(plans_path: &Path, goal: &str, age: i64) -> Option<PlanResult> {
    match matcher::try_match_plan(plans_path, goal, age) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("warning: {goal}: {e}");
            None
        }
    }
}

/// Write the human-readable form of one plan.
pub fn render_plan(out: &mut impl Write, goal: &str, plan: &PlanResult) -> io::Result<()> {
    writeln!(out, "Diet plan for {goal}")?;
    writeln!(out)?;
    writeln!(out, "Full-day meal plan")?;
    writeln!(out, "  Breakfast: {}", plan.breakfast)?;
    writeln!(out, "  Lunch:     {}", plan.lunch)?;
    writeln!(out, "  Dinner:    {}", plan.dinner)?;
    writeln!(out, "  Snacks:    {}", plan.snacks)?;
    writeln!(out)?;
    writeln!(out, "Macronutrient breakdown")?;
    for key in MACRO_KEYS {
        writeln!(out, "  {:<10} {}", format!("{key}:"), plan.macros.get_or(key, MISSING_MACRO))?;
    }
    writeln!(out)?;
    writeln!(out, "Suggested alternatives")?;
    for key in ALTERNATIVE_KEYS {
        writeln!(
            out,
            "  {:<10} {}",
            format!("{key}:"),
            plan.alternatives.get_or(key, MISSING_ALTERNATIVE)
        )?;
    }
    Ok(())
}
