//! Configuration system for the checker
//!
//! Reads configuration from:
//! - `.seorc.yaml` / `.seorc.yml` / `.seorc.json` (project-level)
//! - the same names in the home directory (user-level)
//!
//! When no file is found, the built-in rule set is used.

use crate::rule::{Conditions, Limit, Rule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file names, in lookup order
pub const CONFIG_NAMES: [&str; 3] = [".seorc.yaml", ".seorc.yml", ".seorc.json"];

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,

    /// Color mode
    pub color: ColorMode,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Color mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default rule set, evaluated in order
    pub rules: Vec<Rule>,

    /// Output settings
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            output: OutputConfig::default(),
        }
    }
}

/// Built-in rule set
pub fn default_rules() -> Vec<Rule> {
    vec![
        // every <img> has a non-empty attr
        Rule::new("img").with_all(Conditions::new().with("attr", "*")),
        // every <a> has a non-empty href
        Rule::new("a").with_all(Conditions::new().with("href", "*")),
        Rule::new("head title").with_limit(Limit::at_least(1)),
        Rule::new("head meta").with_contain(Conditions::new().with("name", "description")),
        Rule::new("head meta").with_contain(Conditions::new().with("name", "keywords")),
        Rule::new("strong").with_limit(Limit::at_most(2)),
        Rule::new("h1").with_limit(Limit::at_most(1)),
    ]
}

impl Config {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown config file format: {}",
                    ext
                )))
            }
        };

        log::debug!(
            "Loaded config from {} ({} rules)",
            path.display(),
            config.rules.len()
        );
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_dirs(&[PathBuf::from("."), dirs::home_dir().unwrap_or_default()])
    }

    /// Load the first config file found in the given directories
    pub fn load_from_dirs(search_dirs: &[PathBuf]) -> Result<Self, ConfigError> {
        for dir in search_dirs.iter().filter(|d| !d.as_os_str().is_empty()) {
            for name in &CONFIG_NAMES {
                let path = dir.join(name);
                if path.exists() {
                    return Self::load(&path);
                }
            }
        }

        // Return default config
        Ok(Self::default())
    }

    /// Merge CLI arguments into configuration
    pub fn merge_cli(&mut self, format: Option<OutputFormat>, rules: Option<Vec<Rule>>) {
        if let Some(f) = format {
            self.output.format = f;
        }
        if let Some(r) = rules {
            self.rules = r;
        }
    }
}
