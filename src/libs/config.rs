//! Configuration for the Jira connection and the report output.
//!
//! Settings come from two places, applied in this order:
//!
//! 1. `config.json` in the platform data directory, written by
//!    `jira-timelogs init`:
//!    - **Windows**: `%LOCALAPPDATA%\jira-timelogs\config.json`
//!    - **macOS**: `~/Library/Application Support/jira-timelogs/config.json`
//!    - **Linux**: `~/.local/share/jira-timelogs/config.json`
//! 2. Environment variables (a `.env` file in the working directory is
//!    loaded first by `main`):
//!
//! | Variable                 | Setting                  |
//! |--------------------------|--------------------------|
//! | `JIRA_URL`               | `jira.api_url`           |
//! | `JIRA_EMAIL`             | `jira.email`             |
//! | `JIRA_API_TOKEN`         | `jira.api_token`         |
//! | `OUTPUT_FILENAME_PREFIX` | `output.filename_prefix` |
//! | `OUTPUT_DIR`             | `output.directory`       |
//!
//! The resolved [`Config`] is passed explicitly into the fetcher and the
//! report writer; nothing reads settings from global state afterwards.
//!
//! ```rust,no_run
//! use jira_timelogs::libs::config::Config;
//!
//! let config = Config::read()?.with_env();
//! let jira = config.jira()?;
//! println!("Reporting from {}", jira.api_url);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::api::jira::JiraConfig;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Filename prefix used when none is configured.
pub const DEFAULT_FILENAME_PREFIX: &str = "jira_time_logs";

pub const ENV_JIRA_URL: &str = "JIRA_URL";
pub const ENV_JIRA_EMAIL: &str = "JIRA_EMAIL";
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
pub const ENV_FILENAME_PREFIX: &str = "OUTPUT_FILENAME_PREFIX";
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";

/// Where and under which name reports are written.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OutputConfig {
    /// Leading part of the report filename, e.g. `jira_time_logs`.
    pub filename_prefix: String,
    /// Directory that receives the report. Relative paths resolve against
    /// the working directory.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            directory: default_directory(),
        }
    }
}

impl OutputConfig {
    pub fn init(config: &Option<Self>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleOutput);

        let filename_prefix: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptFilenamePrefix.to_string())
            .default(config.filename_prefix)
            .interact_text()?;
        let directory: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptOutputDirectory.to_string())
            .default(config.directory.display().to_string())
            .interact_text()?;

        Ok(Self {
            filename_prefix: filename_prefix.trim().to_string(),
            directory: PathBuf::from(directory.trim()),
        })
    }
}

/// Root configuration; both sections are optional in the file.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira: Option<JiraConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

impl Config {
    /// Path of the configuration file in the platform data directory.
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    /// Reads the stored configuration; a missing file yields the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        Self::read_from(&Self::path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Writes pretty-printed JSON to `path`, replacing any existing file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the stored configuration file. Returns `false` if there was none.
    pub fn delete() -> Result<bool> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    /// Applies overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = get(ENV_JIRA_URL) {
            self.jira.get_or_insert_with(JiraConfig::default).api_url = url;
        }
        if let Some(email) = get(ENV_JIRA_EMAIL) {
            self.jira.get_or_insert_with(JiraConfig::default).email = email;
        }
        if let Some(token) = get(ENV_JIRA_API_TOKEN) {
            self.jira.get_or_insert_with(JiraConfig::default).api_token = token;
        }
        if let Some(prefix) = get(ENV_FILENAME_PREFIX) {
            self.output.get_or_insert_with(OutputConfig::default).filename_prefix = prefix;
        }
        if let Some(directory) = get(ENV_OUTPUT_DIR) {
            self.output.get_or_insert_with(OutputConfig::default).directory = PathBuf::from(directory);
        }
        self
    }

    /// Jira settings, checked for completeness.
    ///
    /// # Errors
    ///
    /// Fails when the section is absent or any of URL, e-mail and token is
    /// empty; the message says how to fix it.
    pub fn jira(&self) -> Result<JiraConfig> {
        let Some(jira) = &self.jira else {
            msg_bail_anyhow!(Message::JiraNotConfigured);
        };
        let missing = jira.missing_fields();
        if !missing.is_empty() {
            msg_bail_anyhow!(Message::JiraConfigIncomplete(missing.join(", ")));
        }
        Ok(jira.clone())
    }

    /// Output settings, falling back to the defaults.
    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }

    /// Interactive setup for every section, pre-filled from the stored file.
    pub fn init() -> Result<Self> {
        let config = Self::read().unwrap_or_default();
        Ok(Self {
            jira: Some(JiraConfig::init(&config.jira)?),
            output: Some(OutputConfig::init(&config.output)?),
        })
    }
}
