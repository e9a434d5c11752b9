// File: src/config.rs
// Purpose: Configuration parsing from tender.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::notify::NotificationTiming;
use crate::validation::ValidationRules;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// REST backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "default_resize_settle_ms")]
    pub resize_settle_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,

    #[serde(default = "default_enter_ms")]
    pub enter_ms: u64,

    #[serde(default = "default_exit_ms")]
    pub exit_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationConfig {
    #[serde(default = "default_description_min_length")]
    pub description_min_length: usize,
}

// Default values
fn default_base_url() -> String {
    "http://localhost:8888".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_resize_settle_ms() -> u64 {
    250
}

fn default_display_ms() -> u64 {
    5000
}

fn default_enter_ms() -> u64 {
    100
}

fn default_exit_ms() -> u64 {
    300
}

fn default_description_min_length() -> usize {
    10
}

// Default implementations
impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            resize_settle_ms: default_resize_settle_ms(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
            enter_ms: default_enter_ms(),
            exit_ms: default_exit_ms(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            description_min_length: default_description_min_length(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl LayoutConfig {
    pub fn resize_settle(&self) -> Duration {
        Duration::from_millis(self.resize_settle_ms)
    }
}

impl NotificationConfig {
    pub fn timing(&self) -> NotificationTiming {
        NotificationTiming {
            enter: Duration::from_millis(self.enter_ms),
            display: Duration::from_millis(self.display_ms),
            exit: Duration::from_millis(self.exit_ms),
        }
    }
}

impl ValidationConfig {
    pub fn rules(&self) -> ValidationRules {
        ValidationRules {
            description_min_length: self.description_min_length,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./tender.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("tender.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8888");
        assert_eq!(config.search.debounce(), Duration::from_millis(300));
        assert_eq!(config.layout.resize_settle(), Duration::from_millis(250));
        assert_eq!(config.notifications.timing(), NotificationTiming::default());
        assert_eq!(config.validation.rules(), ValidationRules::default());
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [api]
            base_url = "https://tenders.example.org"

            [search]
            debounce_ms = 150
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "https://tenders.example.org");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.notifications.display_ms, 5000);
    }

    #[test]
    fn test_load_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("tender.toml");
        assert_eq!(Config::load(&missing).unwrap(), Config::default());

        fs::write(&missing, "  \n").unwrap();
        assert_eq!(Config::load(&missing).unwrap(), Config::default());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[validation]\ndescription_min_length = 20").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.validation.rules().description_min_length, 20);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search]\ndebounce_ms = \"soon\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
