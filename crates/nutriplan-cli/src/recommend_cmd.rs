//! `nutriplan recommend` command: lifestyle advice for an age group.

use std::path::Path;

use anyhow::Result;

use nutriplan_core::recommend;

pub fn run_recommend(
    recommendations_path: &Path,
    age: i64,
    lifestyle: &str,
    concern: &str,
) -> Result<()> {
    let lifestyle = lifestyle.trim();
    let concern = concern.trim();

    let Some(row) = recommend::recommend_from(recommendations_path, age, lifestyle, concern) else {
        println!(
            "No recommendation found for {lifestyle} lifestyle, concern '{concern}', age group {}.",
            recommend::age_group(age)
        );
        return Ok(());
    };

    println!(
        "Recommendation for {} / {} (age {})",
        row.lifestyle, row.health_concern, row.age_range
    );
    for (column, value) in &row.details {
        println!("  {column}: {value}");
    }
    Ok(())
}
