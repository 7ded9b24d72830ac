//! Gateway connection settings loaded from a YAML file.
//!
//! The file keeps everything under a mandatory `api` section:
//!
//! ```yaml
//! api:
//!   token: my-token
//!   host: gateway.local
//!   port: 5000
//! ```
//!
//! Keys missing from the section fall back to [`ApiConfig::default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Host used when the configuration does not name one.
pub const DEFAULT_HOST: &str = "localhost";
/// Port used when the configuration does not name one.
pub const DEFAULT_PORT: u16 = 5000;

/// Error types for configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration YAML: {0}")]
    Parse(#[from] serde_yml::Error),
    #[error("Could not find \"api\" key in configuration file")]
    MissingApiSection,
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Connection settings for a single gateway.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Authentication token, sent as the basic-auth username.
    #[serde(deserialize_with = "string_or_number")]
    pub token: String,
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ApiConfig {
    /// Load and validate settings from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let yaml_content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_yaml_str(&yaml_content)
    }

    /// Parse and validate settings from YAML content.
    ///
    /// A missing or null `api` key is an error; an empty `api` mapping is not.
    pub fn from_yaml_str(yaml_content: &str) -> Result<Self, ConfigError> {
        let document: serde_yml::Value = serde_yml::from_str(yaml_content)?;
        let section = match document.get("api") {
            Some(section) if !section.is_null() => section.clone(),
            _ => return Err(ConfigError::MissingApiSection),
        };
        let config: ApiConfig = serde_yml::from_value(section)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot address a gateway.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Accepts a token written as a YAML string or as a bare number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Token {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(match Token::deserialize(deserializer)? {
        Token::Text(s) => s,
        Token::Unsigned(n) => n.to_string(),
        Token::Signed(n) => n.to_string(),
        Token::Float(n) => n.to_string(),
    })
}
