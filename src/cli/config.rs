// ABOUTME: Configuration management for the mergeflow application
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::services::{ChronoDateFormatter, DEFAULT_DATE_FORMAT};
use crate::tags::{ResolverSettings, DEFAULT_WORKFLOW_LABEL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_workflow_label")]
    pub workflow_label: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_workflow_label() -> String {
    DEFAULT_WORKFLOW_LABEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            workflow_label: default_workflow_label(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = serde_yaml::from_str(&contents)?;

            // Merge with environment variables
            config.merge_env();

            Ok(config)
        } else {
            let mut config = Config::default();
            config.merge_env();
            Ok(config)
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Result<PathBuf> {
        let possible_paths = vec![
            PathBuf::from("mergeflow.yaml"),
            PathBuf::from("mergeflow.yml"),
            PathBuf::from(".mergeflow.yaml"),
            PathBuf::from(".mergeflow.yml"),
        ];

        // Check home directory
        if let Some(home_dir) = dirs::home_dir() {
            let home_config = home_dir.join(".mergeflow").join("config.yaml");
            if home_config.exists() {
                return Ok(home_config);
            }
        }

        // Check current directory
        for path in possible_paths {
            if path.exists() {
                return Ok(path);
            }
        }

        // Return default path (may not exist)
        Ok(PathBuf::from("mergeflow.yaml"))
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) {
        if let Ok(format) = std::env::var("MERGEFLOW_DATE_FORMAT") {
            self.date_format = format;
        }
        if let Ok(label) = std::env::var("MERGEFLOW_WORKFLOW_LABEL") {
            self.workflow_label = label;
        }

        // Logging configuration
        if let Ok(level) = std::env::var("MERGEFLOW_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MERGEFLOW_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            workflow_label: self.workflow_label.clone(),
        }
    }

    pub fn date_formatter(&self) -> ChronoDateFormatter {
        ChronoDateFormatter::new(&self.date_format)
    }
}
