//! Configuration and credential management.
//!
//! Settings live in a single TOML file:
//!
//! - System: `~/.config/linctl/config.toml`
//! - Override: `$LINCTL_CONFIG_DIR/config.toml` (used by tests)
//!
//! Contents:
//! - `api_key` - Linear API key (secret)
//! - `api_url` - GraphQL endpoint override (rarely needed)
//! - `default_team` - Team key assumed when `--team` is omitted
//!
//! ## Security
//!
//! The config file MUST be created with 0600 permissions (owner
//! read/write only) because it contains the API key.
//!
//! ## Precedence
//!
//! For the API key: `LINEAR_API_KEY` env var > config file.
//! For the endpoint: `LINCTL_API_URL` env var > config file > default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_URL;
use crate::{Error, Result};

/// Environment variable holding the API key, taking precedence over the
/// config file.
pub const API_KEY_ENV: &str = "LINEAR_API_KEY";

/// Environment variable overriding the GraphQL endpoint.
pub const API_URL_ENV: &str = "LINCTL_API_URL";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "LINCTL_CONFIG_DIR";

/// Config file permissions on Unix (owner read/write only).
#[cfg(unix)]
pub const CONFIG_FILE_MODE: u32 = 0o600;

/// Persisted configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Linear API key (secret)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// GraphQL endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Team key assumed when `--team` is omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_team: Option<String>,
}

impl Config {
    /// Load configuration from the resolved config directory.
    ///
    /// A missing file is not an error; it loads as defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file()?)
    }

    /// Load configuration from an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to the resolved config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_file()?)
    }

    /// Save configuration to an explicit file path, creating parent
    /// directories and restricting permissions to 0600 on Unix.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, raw)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(CONFIG_FILE_MODE);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// The API key to use: env var first, then the config file.
    pub fn api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }
        self.api_key.clone().ok_or(Error::MissingApiKey)
    }

    /// The GraphQL endpoint to use: env var, config file, then default.
    pub fn api_url(&self) -> String {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return url;
            }
        }
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Get a non-secret setting by key.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "default-team" => Ok(self.default_team.clone().unwrap_or_default()),
            "api-url" => Ok(self.api_url.clone().unwrap_or_default()),
            _ => Err(Error::InvalidInput(format!("unknown config key: {}", key))),
        }
    }

    /// Set a non-secret setting by key. An empty value clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = (!value.trim().is_empty()).then(|| value.trim().to_string());
        match key {
            "default-team" => self.default_team = value,
            "api-url" => self.api_url = value,
            _ => return Err(Error::InvalidInput(format!("unknown config key: {}", key))),
        }
        Ok(())
    }

    /// All settings as key/value pairs, with the API key redacted.
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            (
                "api-key".to_string(),
                if self.api_key.is_some() {
                    "(set)".to_string()
                } else {
                    "(unset)".to_string()
                },
            ),
            (
                "api-url".to_string(),
                self.api_url.clone().unwrap_or_default(),
            ),
            (
                "default-team".to_string(),
                self.default_team.clone().unwrap_or_default(),
            ),
        ]
    }
}

/// Resolve the config directory: `LINCTL_CONFIG_DIR` override first,
/// then the platform config dir.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    dirs::config_dir()
        .map(|d| d.join("linctl"))
        .ok_or_else(|| Error::Config("could not determine config directory".to_string()))
}

/// Path of the config file inside the resolved config directory.
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
