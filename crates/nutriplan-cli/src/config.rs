//! Configuration file management for nutriplan.
//!
//! Provides a TOML-based config file at `~/.config/nutriplan/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use nutriplan_core::presets::{PLANS_FILE, RECOMMENDATIONS_FILE};

pub const PLANS_PATH_ENV: &str = "NUTRIPLAN_PLANS_PATH";
pub const RECOMMENDATIONS_PATH_ENV: &str = "NUTRIPLAN_RECOMMENDATIONS_PATH";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub data: DataSection,
    #[serde(default)]
    pub profile: ProfileSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DataSection {
    /// Path to the plan table CSV.
    pub plans_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations_path: Option<PathBuf>,
}

/// Defaults applied when a command omits `--age` or `--goal`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the nutriplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/nutriplan` or
/// `~/.config/nutriplan`. The starter tables live here too unless the config
/// file points elsewhere.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("nutriplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("nutriplan")
}

/// Return the path to the nutriplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn default_plans_path() -> PathBuf {
    config_dir().join(PLANS_FILE)
}

pub fn default_recommendations_path() -> PathBuf {
    config_dir().join(RECOMMENDATIONS_FILE)
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns `Ok(None)` if it does not exist.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct NutriplanConfig {
    pub plans_path: PathBuf,
    pub recommendations_path: PathBuf,
    pub profile: ProfileSection,
}

impl NutriplanConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Plans: `cli_plans` > `NUTRIPLAN_PLANS_PATH` > `data.plans_path` > `<config dir>/predefined_diet_plans.csv`
    /// - Recommendations: `NUTRIPLAN_RECOMMENDATIONS_PATH` > `data.recommendations_path` > `<config dir>/diet_plans.csv`
    /// - Profile: `[profile]` from the config file, empty otherwise.
    pub fn resolve(cli_plans: Option<&Path>) -> Result<Self> {
        let file_config = load_config()?;

        let plans_path = if let Some(path) = cli_plans {
            path.to_path_buf()
        } else if let Some(path) = std::env::var_os(PLANS_PATH_ENV) {
            PathBuf::from(path)
        } else if let Some(ref cfg) = file_config {
            cfg.data.plans_path.clone()
        } else {
            default_plans_path()
        };

        let recommendations_path = if let Some(path) = std::env::var_os(RECOMMENDATIONS_PATH_ENV) {
            PathBuf::from(path)
        } else if let Some(path) = file_config
            .as_ref()
            .and_then(|cfg| cfg.data.recommendations_path.clone())
        {
            path
        } else {
            default_recommendations_path()
        };

        let profile = file_config.map(|cfg| cfg.profile).unwrap_or_default();

        tracing::debug!(
            plans = %plans_path.display(),
            recommendations = %recommendations_path.display(),
            "resolved configuration"
        );

        Ok(Self {
            plans_path,
            recommendations_path,
            profile,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
