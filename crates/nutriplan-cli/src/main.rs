mod config;
mod plan_cmd;
mod recommend_cmd;
mod table_cmds;
#[cfg(test)]
mod test_util;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use nutriplan_core::presets::{self, WriteOutcome};

use config::NutriplanConfig;
use plan_cmd::PlanQuery;

#[derive(Parser)]
#[command(name = "nutriplan", about = "Diet plans by health goal and age", version)]
struct Cli {
    /// Plan table CSV (overrides NUTRIPLAN_PLANS_PATH env var)
    #[arg(long, global = true)]
    plans: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file and the starter tables
    Init {
        /// Overwrite existing config and tables
        #[arg(long)]
        force: bool,
    },
    /// Show the diet plan for one or more health goals
    Plan {
        /// Health goal (repeat for several)
        #[arg(long = "goal")]
        goals: Vec<String>,
        /// Age in years
        #[arg(long)]
        age: Option<i64>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the goals in the plan table with their age ranges
    Goals,
    /// Validate the plan table
    Check,
    /// Look up lifestyle advice for an age group
    Recommend {
        /// Age in years
        #[arg(long)]
        age: i64,
        /// Activity level, e.g. Sedentary, Lightly Active, Active
        #[arg(long)]
        lifestyle: String,
        /// Health concern, e.g. Weight Loss
        #[arg(long)]
        concern: String,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Execute the `nutriplan init` command: write config file and starter tables.
fn cmd_init(plans_path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let plans_path = plans_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_plans_path);
    let recommendations_path = config::default_recommendations_path();

    report_starter(
        &plans_path,
        presets::write_starter_table(&plans_path, force),
    )?;
    report_starter(
        &recommendations_path,
        presets::write_starter_recommendations(&recommendations_path, force),
    )?;

    let cfg = config::ConfigFile {
        data: config::DataSection {
            plans_path: plans_path.clone(),
            recommendations_path: Some(recommendations_path),
        },
        profile: config::ProfileSection::default(),
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  data.plans_path = {}", plans_path.display());
    println!();
    println!("Next: run `nutriplan plan --goal \"Weight Loss\" --age 42`.");

    Ok(())
}

fn report_starter(path: &Path, outcome: std::io::Result<WriteOutcome>) -> anyhow::Result<()> {
    match outcome.with_context(|| format!("failed to write starter table {}", path.display()))? {
        WriteOutcome::Written => println!("Starter table written to {}", path.display()),
        WriteOutcome::Kept => println!("Keeping existing table {}", path.display()),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(cli.plans.as_deref(), force)?;
        }
        Commands::Plan { goals, age, json } => {
            let resolved = NutriplanConfig::resolve(cli.plans.as_deref())?;
            let query = PlanQuery::resolve(goals, age, &resolved.profile)?;
            plan_cmd::run_plan(&resolved.plans_path, &query, json)?;
        }
        Commands::Goals => {
            let resolved = NutriplanConfig::resolve(cli.plans.as_deref())?;
            table_cmds::run_goals(&resolved.plans_path)?;
        }
        Commands::Check => {
            let resolved = NutriplanConfig::resolve(cli.plans.as_deref())?;
            table_cmds::run_check(&resolved.plans_path)?;
        }
        Commands::Recommend {
            age,
            lifestyle,
            concern,
        } => {
            let resolved = NutriplanConfig::resolve(cli.plans.as_deref())?;
            recommend_cmd::run_recommend(
                &resolved.recommendations_path,
                age,
                &lifestyle,
                &concern,
            )?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "nutriplan", &mut std::io::stdout());
        }
    }

    Ok(())
}
