// src/core/config_manager.rs
//! Configuration: defaults, then config.yaml, then environment, then CLI flags

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LOG_FILE: &str = "/tmp/cvlens.log";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    pub environment: String,
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub log_file: PathBuf,
    pub level: String,
}

/// One environment section of config.yaml; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct EnvironmentSection {
    api_base_url: Option<String>,
    timeout_seconds: Option<u64>,
    log_file: Option<PathBuf>,
    log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            service: ServiceConfig {
                api_base_url: DEFAULT_API_BASE_URL.to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECS,
            },
            logging: LoggingConfig {
                log_file: PathBuf::from(DEFAULT_LOG_FILE),
                level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}

impl ConfigManager {
    /// Load configuration from the process environment and config.yaml
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("CVLENS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.yaml"));

        let file_content = if config_path.exists() {
            Some(
                std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?,
            )
        } else {
            None
        };

        Self::from_sources(file_content.as_deref(), |key| std::env::var(key).ok())
    }

    /// Layer an optional YAML document and environment lookups over the defaults.
    pub fn from_sources<F>(file_content: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = env("CVLENS_ENV")
            .or_else(|| env("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string());

        let mut config = Self {
            environment: environment.clone(),
            ..Self::default()
        };

        if let Some(content) = file_content {
            let file: ConfigFile =
                serde_yaml::from_str(content).context("Failed to parse config.yaml")?;
            let section = match environment.as_str() {
                "production" => file.production,
                _ => file.local,
            };
            config.apply_section(section);
        }

        if let Some(url) = env("CVLENS_API_URL") {
            config.service.api_base_url = url;
        }
        if let Some(timeout) = env("CVLENS_TIMEOUT_SECS") {
            config.service.timeout_seconds = timeout
                .parse()
                .context("CVLENS_TIMEOUT_SECS must be a number of seconds")?;
        }

        config.service.api_base_url = normalize_base_url(&config.service.api_base_url);
        Ok(config)
    }

    /// Override the API base URL, e.g. from a command-line flag
    pub fn with_api_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.service.api_base_url = normalize_base_url(&url);
        }
        self
    }

    fn apply_section(&mut self, section: EnvironmentSection) {
        if let Some(url) = section.api_base_url {
            self.service.api_base_url = url;
        }
        if let Some(timeout) = section.timeout_seconds {
            self.service.timeout_seconds = timeout;
        }
        if let Some(log_file) = section.log_file {
            self.logging.log_file = log_file;
        }
        if let Some(level) = section.log_level {
            self.logging.level = level;
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
