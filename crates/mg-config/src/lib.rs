//! Mealgate Configuration System
//!
//! This crate provides TOML-based configuration with environment variable override support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mongodb: MongoConfig,
    pub jwt: JwtSettings,
    pub media: MediaConfig,

    /// Enable development mode
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mongodb: MongoConfig::default(),
            jwt: JwtSettings::default(),
            media: MediaConfig::default(),
            dev_mode: false,
        }
    }
}

/// MongoDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "mealgate".to_string(),
        }
    }
}

/// JWT token settings.
///
/// `key` and `duration_in_days` are deliberately optional/stringly-typed:
/// their absence or an unparseable value must surface as a configuration
/// error when the token service is constructed, never as a silent default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtSettings {
    /// Symmetric signing key (HS256). Required for token issuance.
    pub key: Option<String>,

    /// Token issuer claim.
    pub issuer: String,

    /// Token audience claim.
    pub audience: String,

    /// Token validity in days, as a decimal string (fractional days allowed).
    pub duration_in_days: Option<String>,
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            key: None,
            issuer: "mealgate".to_string(),
            audience: "mealgate".to_string(),
            duration_in_days: None,
        }
    }
}

/// Media (file upload) storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Root directory for uploaded files
    pub upload_dir: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_dir: "./data/uploads".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        let loader = ConfigLoader::new();
        loader.load()
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# Mealgate Configuration
# Environment variables override these settings

[mongodb]
uri = "mongodb://localhost:27017"
database = "mealgate"

[jwt]
key = ""
issuer = "mealgate"
audience = "mealgate"
duration_in_days = "7"

[media]
upload_dir = "./data/uploads"

dev_mode = false
"#
        .to_string()
    }
}
