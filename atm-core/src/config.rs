//! Configuration management
//!
//! The only external setting is the data file path (`ATM_DATA_FILE`). The
//! directory holding it is the data directory, which may carry an optional
//! `settings.json`:
//! ```json
//! {
//!   "app": { "eventLog": true }
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable overriding the data file path
pub const DATA_FILE_ENV: &str = "ATM_DATA_FILE";

const SETTINGS_FILE: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default = "default_event_log")]
    event_log: bool,
}

fn default_event_log() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            event_log: default_event_log(),
        }
    }
}

/// ATM configuration (resolved view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Account file
    pub data_file: PathBuf,
    /// Directory of the account file; holds settings.json and the event log
    pub data_dir: PathBuf,
    /// Whether controller events go to `events.jsonl`
    pub event_log: bool,
}

impl Config {
    /// Load config for `default_data_file`, unless `ATM_DATA_FILE` names
    /// another file
    pub fn load(default_data_file: &Path) -> Result<Self> {
        let env_override = std::env::var(DATA_FILE_ENV).ok();
        Self::load_with_override(default_data_file, env_override.as_deref())
    }

    /// Load config, with a non-blank `data_file_override` taking precedence
    pub fn load_with_override(
        default_data_file: &Path,
        data_file_override: Option<&str>,
    ) -> Result<Self> {
        let data_file = data_file_override
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_file.to_path_buf());

        let data_dir = match data_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let settings = read_settings(&data_dir)?;

        Ok(Self {
            data_file,
            data_dir,
            event_log: settings.app.event_log,
        })
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read settings: {:?}", settings_path))?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}
