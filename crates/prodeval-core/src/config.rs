//! Client configuration management.
//!
//! This module handles loading and saving the client configuration: where
//! the evaluator API lives, which pages the auth helpers redirect to, and
//! where the session file is kept.
//!
//! Configuration is stored at `~/.config/prodeval/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "prodeval";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// The evaluator backend serves its API under `/api` on port 8000.
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

const DEFAULT_LOGIN_PATH: &str = "/login";

const DEFAULT_HOME_PATH: &str = "/";

/// HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How long a toast stays on screen before fading.
const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

const ENV_API_BASE_URL: &str = "PRODEVAL_API_BASE_URL";
const ENV_LOGIN_PATH: &str = "PRODEVAL_LOGIN_PATH";
const ENV_HOME_PATH: &str = "PRODEVAL_HOME_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub login_path: String,
    pub home_path: String,
    pub request_timeout_secs: u64,
    pub toast_duration_ms: u64,
    /// Overrides the default session directory under the user cache dir
    pub session_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            home_path: DEFAULT_HOME_PATH.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            session_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from the default location, then apply `.env` and environment
    /// overrides.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (silently ignore if not found)
        let _ = dotenvy::dotenv();
        let mut config = Self::load()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Replace fields from `lookup`, keyed by the `PRODEVAL_*` variable names.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(path) = lookup(ENV_LOGIN_PATH) {
            self.login_path = path;
        }
        if let Some(path) = lookup(ENV_HOME_PATH) {
            self.home_path = path;
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn session_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.session_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    pub fn toast_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.toast_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.toast_duration().as_millis(), 3000);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            api_base_url: "https://evaluator.example.com/api".to_string(),
            session_dir: Some(dir.path().join("sessions")),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.session_dir().unwrap(), dir.path().join("sessions"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"home_path": "/dashboard"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.home_path, "/dashboard");
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "PRODEVAL_API_BASE_URL" => Some("http://10.0.0.5:8000/api".to_string()),
            "PRODEVAL_HOME_PATH" => Some("/products".to_string()),
            _ => None,
        });

        assert_eq!(config.api_base_url, "http://10.0.0.5:8000/api");
        assert_eq!(config.home_path, "/products");
        assert_eq!(config.login_path, "/login");
    }
}
