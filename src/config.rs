use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_LOG_DIR, DEFAULT_OUTPUT_PATH, LOG_DIR_ENV, OUTPUT_ENV};
use crate::error::{Result, ScraperError};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    /// JSON lines file, recreated on every run
    pub path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    /// Filter used when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIR),
            level: "resolutions=info".to_string(),
        }
    }
}

impl Config {
    /// Load `config_path` if it exists, then apply environment overrides.
    pub fn load(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.export.path.as_os_str().is_empty() {
            return Err(ScraperError::Config("export.path must not be empty".to_string()));
        }
        Ok(config)
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(OUTPUT_ENV).filter(|v| !v.trim().is_empty()) {
            self.export.path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(LOG_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.logging.directory = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_file_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.export.path, PathBuf::from("gov.json"));

        // A missing file is not an error
        assert!(Config::load(&temp_dir.path().join("config.toml")).is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            [export]
            path = "out/resolutions.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.export.path, PathBuf::from("out/resolutions.json"));
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(matches!(
            Config::from_toml("[export\npath = 1"),
            Err(ScraperError::Toml(_))
        ));
        assert!(matches!(
            Config::from_toml("[export]\npath = \"\""),
            Err(ScraperError::Config(_))
        ));
    }

    #[test]
    fn test_environment_overrides_file() {
        let env: HashMap<&str, &str> = [
            (OUTPUT_ENV, "/data/gov.json"),
            (LOG_DIR_ENV, "  "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.export.path, PathBuf::from("/data/gov.json"));
        assert_eq!(config.logging.directory, PathBuf::from("logs"));
    }
}
