use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default location of the configuration file, relative to the
/// working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

const DEFAULT_STREAM_ENDPOINT: &str = "wss://stream.twitter.com/1.1/statuses/filter.json";
const DEFAULT_PERMALINK_DOMAIN: &str = "twitter.com";
const DEFAULT_DB_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_DB_NAMESPACE: &str = "hashtrack";
const DEFAULT_DB_NAME: &str = "test";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration file {path} is not valid JSON")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// An API key or token together with its secret.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenPair {
    pub token: String,
    pub secret: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatabaseConfig {
    #[serde(default = "default_db_address")]
    pub address: String,
    #[serde(default = "default_db_namespace")]
    pub namespace: String,
    #[serde(default = "default_db_name")]
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            address: default_db_address(),
            namespace: default_db_namespace(),
            name: default_db_name(),
            username: None,
            password: None,
        }
    }
}

/// Everything read from `config.json`. Credentials are required; the
/// rest falls back to defaults so a minimal file keeps working.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppConfig {
    pub consumer: TokenPair,
    pub access: TokenPair,
    #[serde(default = "default_stream_endpoint")]
    pub stream_endpoint: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default = "default_permalink_domain")]
    pub permalink_domain: String,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
            path: path.display().to_string(),
            source,
        })
    }
}

fn default_stream_endpoint() -> String {
    DEFAULT_STREAM_ENDPOINT.to_string()
}

fn default_permalink_domain() -> String {
    DEFAULT_PERMALINK_DOMAIN.to_string()
}

fn default_db_address() -> String {
    DEFAULT_DB_ADDRESS.to_string()
}

fn default_db_namespace() -> String {
    DEFAULT_DB_NAMESPACE.to_string()
}

fn default_db_name() -> String {
    DEFAULT_DB_NAME.to_string()
}
