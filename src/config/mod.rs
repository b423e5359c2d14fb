//! Configuration management for wsaudit
//!
//! The config file is a YAML document pointing at the target TFE instance.
//! `tfe_url` is required; `organizations` optionally pins the audit to a
//! fixed set of organization names instead of listing the whole instance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Application configuration loaded from a YAML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the target TFE instance (e.g. https://tfe.example.com)
    #[serde(default)]
    pub tfe_url: Option<String>,

    /// Optional fixed set of organization names to audit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizations: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a specific path and validate it.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Validate that required configuration is present.
    fn validate(&self) -> Result<()> {
        match self.tfe_url.as_deref() {
            None => Err(ConfigError::MissingKey("tfe_url").into()),
            Some("") => Err(ConfigError::Invalid("tfe_url must not be empty".to_string()).into()),
            Some(_) => Ok(()),
        }
    }

    /// The validated TFE base URL, with any trailing slash removed.
    pub fn tfe_url(&self) -> &str {
        self.tfe_url
            .as_deref()
            .expect("validated at load")
            .trim_end_matches('/')
    }
}
