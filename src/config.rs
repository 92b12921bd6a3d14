use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use gcal_notion_core::constants::DEFAULT_CALENDAR_ID;
use gcal_notion_provider_google::GOOGLE_CALENDAR_API_BASE;
use gcal_notion_store_notion::NOTION_API_BASE;
use serde::Deserialize;

/// Prefix of environment variables that override the config file,
/// e.g. `GCAL_NOTION_NOTION_TOKEN`.
const ENV_PREFIX: &str = "GCAL_NOTION";

fn default_calendar_id() -> String {
    DEFAULT_CALENDAR_ID.to_string()
}

fn default_notion_api_base() -> String {
    NOTION_API_BASE.to_string()
}

fn default_google_api_base() -> String {
    GOOGLE_CALENDAR_API_BASE.to_string()
}

/// Static settings and secrets, read once at process start.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub notion_token: String,
    /// Notion database that receives one page per event.
    pub database_id: String,
    /// OAuth access token with calendar read scope.
    pub google_access_token: String,

    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,

    #[serde(default = "default_notion_api_base")]
    pub notion_api_base: String,

    #[serde(default = "default_google_api_base")]
    pub google_api_base: String,
}

impl AppConfig {
    /// Load from ~/.config/gcal-notion/config.toml (optional) and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("Failed to read config from {}", path.display()))?
            .try_deserialize()
            .with_context(|| {
                format!(
                    "Incomplete configuration.\n\n\
                    Set notion_token, database_id and google_access_token in {}\n\
                    or as {}_NOTION_TOKEN, {}_DATABASE_ID and {}_GOOGLE_ACCESS_TOKEN.",
                    path.display(),
                    ENV_PREFIX,
                    ENV_PREFIX,
                    ENV_PREFIX
                )
            })
    }
}

/// Get the config directory path (~/.config/gcal-notion)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("gcal-notion");
    Ok(config_dir)
}

/// Get the config file path (~/.config/gcal-notion/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the sync state path (~/.config/gcal-notion/state.toml)
pub fn state_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("state.toml"))
}
