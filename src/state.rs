use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::roster::TeamMember;
use crate::types::{Config, WorkflowId};
use crate::util::{name_from_email, split_addresses};

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "DAILY_MEMO_CONFIG";

/// Default config location: ~/.daily-memo/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".daily-memo").join("config.json"))
}

/// Load configuration from the config file and the environment, validated
/// for `workflow`.
///
/// The file named by DAILY_MEMO_CONFIG must exist. Without it the default
/// path is optional, so a fully env-driven setup (including EMAIL_TO) works.
pub fn load_config(workflow: WorkflowId) -> Result<Config, ConfigError> {
    let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) => read_config(Path::new(&path))?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_config(&path)?,
            _ => {
                log::debug!("No config file found; using environment only");
                Config::default()
            }
        },
    };

    apply_env(&mut config, |key| std::env::var(key).ok())?;
    config.validate(workflow)?;
    Ok(config)
}

pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Apply environment overrides. Non-empty variables win over the file.
///
/// EMAIL_TO replaces the roster with one UTC member per address.
pub fn apply_env<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = var("NOTION_TOKEN") {
        config.notion.token = v;
    }
    if let Some(v) = var("NOTION_DATABASE_ID") {
        config.notion.database_id = v;
    }
    if let Some(v) = var("EMAIL_HOST") {
        config.mail.host = v;
    }
    if let Some(v) = var("EMAIL_PORT") {
        config.mail.port = v.trim().parse().map_err(|_| ConfigError::Invalid {
            key: "EMAIL_PORT",
            value: v.clone(),
        })?;
    }
    if let Some(v) = var("EMAIL_USER") {
        config.mail.username = v;
    }
    if let Some(v) = var("EMAIL_PASSWORD") {
        config.mail.password = v;
    }
    if let Some(v) = var("EMAIL_FROM") {
        config.mail.from = v;
    }
    if let Some(v) = var("EMAIL_TO") {
        config.roster = split_addresses(&v)
            .iter()
            .map(|email| TeamMember::new(&name_from_email(email), email, "UTC"))
            .collect();
    }

    Ok(())
}
