//! `.ballantine.json` settings.
//!
//! Two scopes share one file name:
//! - `Local`: the current directory, i.e. the repository being deployed
//! - `Global`: the user's home directory
//!
//! A missing file reads as empty; `set` creates it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const CONFIG_FILE: &str = ".ballantine.json";
pub const SLACK_WEBHOOK: &str = "slack_webhook";
pub const KEYS: &[&str] = &[SLACK_WEBHOOK];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Local,
    Global,
}

impl Scope {
    pub fn directory(self) -> Result<PathBuf> {
        match self {
            Scope::Local => Ok(std::env::current_dir()?),
            Scope::Global => dirs::home_dir()
                .ok_or_else(|| AppError::InvalidParameter("home directory not found".to_string())),
        }
    }
}

/// Where a diff report goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Terminal,
    Slack,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slack_webhook: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    settings: Settings,
}

impl Config {
    pub fn load(scope: Scope) -> Result<Self> {
        Self::load_from(&scope.directory()?)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let settings = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            tracing::debug!("No config at {}", path.display());
            Settings::default()
        };
        Ok(Self { path, settings })
    }

    pub fn init(scope: Scope, force: bool) -> Result<PathBuf> {
        Self::init_in(&scope.directory()?, force)
    }

    /// Write an empty config file. Refuses to clobber one unless `force`.
    pub fn init_in(dir: &Path, force: bool) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() && !force {
            return Err(AppError::AlreadyExists(path.to_string_lossy().to_string()));
        }
        fs::write(&path, "{}\n")?;
        tracing::info!("Created {}", path.display());
        Ok(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Result<Option<&str>> {
        validate_key(key)?;
        Ok(self.settings.slack_webhook.as_deref())
    }

    /// Set `key` and write the file immediately.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.settings.slack_webhook = Some(value.to_string());
        self.save()
    }

    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        self.settings
            .slack_webhook
            .as_deref()
            .map(|value| (SLACK_WEBHOOK, value))
            .into_iter()
            .collect()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, json + "\n")?;
        tracing::debug!("Saved {}", self.path.display());
        Ok(())
    }
}

pub fn validate_key(key: &str) -> Result<()> {
    if KEYS.contains(&key) {
        Ok(())
    } else {
        Err(AppError::InvalidParameter(format!(
            "unknown key \"{}\" (expected one of: {})",
            key,
            KEYS.join(", ")
        )))
    }
}

/// Webhook for a diff run: the local value wins over the global one.
pub fn effective_webhook(local: &Config, global: &Config) -> Option<String> {
    [local, global]
        .into_iter()
        .filter_map(|config| config.settings.slack_webhook.as_deref())
        .find(|url| !url.is_empty())
        .map(str::to_string)
}
