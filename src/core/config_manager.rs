// src/core/config_manager.rs
//! Client configuration: config.yaml, then environment, then CLI flags

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::service_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

pub const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_LOG_FILE: &str = "/tmp/resume-editor.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    pub backend_url: String,
    pub timeout_seconds: u64,
    pub log_file: PathBuf,
    pub log_level: String,
    pub export_dir: PathBuf,
}

/// Every key is optional, missing ones keep their default
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    backend_url: Option<String>,
    timeout_seconds: Option<u64>,
    log_file: Option<PathBuf>,
    log_level: Option<String>,
    export_dir: Option<PathBuf>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl ConfigManager {
    /// Load configuration from `config.yaml` in the working directory, if
    /// present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        let config_path = PathBuf::from(CONFIG_FILE);
        if config_path.exists() {
            config.merge_file(&config_path)?;
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        info!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.merge_yaml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn merge_yaml(&mut self, content: &str) -> Result<()> {
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(content)?
        };

        if let Some(url) = file.backend_url {
            self.backend_url = url;
        }
        if let Some(timeout) = file.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(log_file) = file.log_file {
            self.log_file = log_file;
        }
        if let Some(level) = file.log_level {
            self.log_level = level;
        }
        if let Some(dir) = file.export_dir {
            self.export_dir = dir;
        }
        Ok(())
    }

    /// Environment overrides, `lookup` stands in for `std::env::var`
    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("RESUME_BACKEND_URL") {
            self.backend_url = url;
        }
        if let Some(timeout) = lookup("RESUME_TIMEOUT_SECS") {
            self.timeout_seconds = timeout
                .parse::<u64>()
                .context("RESUME_TIMEOUT_SECS must be a number of seconds")?;
        }
        if let Some(log_file) = lookup("RESUME_LOG_FILE") {
            self.log_file = PathBuf::from(log_file);
        }
        if let Some(dir) = lookup("RESUME_EXPORT_DIR") {
            self.export_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn with_backend_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.backend_url = url;
        }
        self
    }

    pub fn with_export_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.export_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ConfigManager::default();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.log_file, PathBuf::from("/tmp/resume-editor.log"));
    }

    #[test]
    fn test_yaml_overrides_only_given_keys() {
        let mut config = ConfigManager::default();
        config
            .merge_yaml("backend_url: http://backend:9000\ntimeout_seconds: 5\n")
            .unwrap();

        assert_eq!(config.backend_url, "http://backend:9000");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_empty_yaml_is_accepted() {
        let mut config = ConfigManager::default();
        config.merge_yaml("").unwrap();
        assert_eq!(config, ConfigManager::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("RESUME_BACKEND_URL", "http://env:8000"),
            ("RESUME_EXPORT_DIR", "/tmp/exports"),
        ]
        .into_iter()
        .collect();

        let mut config = ConfigManager::default();
        config.merge_yaml("backend_url: http://file:8000").unwrap();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.backend_url, "http://env:8000");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let mut config = ConfigManager::default();
        let result = config.apply_env(|key| {
            (key == "RESUME_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_flags_win() {
        let config = ConfigManager::default()
            .with_backend_url(Some("http://flag:1".to_string()))
            .with_export_dir(None);
        assert_eq!(config.backend_url, "http://flag:1");
        assert_eq!(config.export_dir, PathBuf::from("."));
    }
}
