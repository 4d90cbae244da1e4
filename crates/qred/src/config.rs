use std::{env, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

const DEFAULT_REGION: &str = "eu-central-1";
const DEFAULT_DYNAMODB_ENDPOINT: &str = "http://host.docker.internal:8000";
const DEFAULT_TABLE_NAME: &str = "QredMain";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown storage backend: {0} (expected 'dynamodb' or 'memory')")]
    UnknownStorageBackend(String),
    #[error("Storage backend '{0}' is not compiled in (rebuild with the '{0}' feature)")]
    BackendNotCompiled(&'static str),
}

/// Where items are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    #[cfg(feature = "dynamodb")]
    DynamoDb,
    /// In-process store, for local runs without DynamoDB.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            #[cfg(feature = "dynamodb")]
            "dynamodb" => Ok(StorageBackend::DynamoDb),
            #[cfg(not(feature = "dynamodb"))]
            "dynamodb" => Err(ConfigError::BackendNotCompiled("dynamodb")),
            "memory" | "inmemory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::UnknownStorageBackend(s.to_string())),
        }
    }
}

impl Default for StorageBackend {
    #[cfg(feature = "dynamodb")]
    fn default() -> Self {
        StorageBackend::DynamoDb
    }

    #[cfg(not(feature = "dynamodb"))]
    fn default() -> Self {
        StorageBackend::Memory
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// AWS region (default: "eu-central-1")
    pub region: String,
    /// DynamoDB endpoint override (default: local DynamoDB).
    /// `None` lets the SDK resolve the regional endpoint.
    pub dynamodb_endpoint: Option<String>,
    /// Table holding every entity (default: "QredMain")
    pub table_name: String,
    /// Storage backend (default: DynamoDB when compiled in, else memory)
    pub storage: StorageBackend,
    /// JSON array of items loaded into the memory backend at startup.
    pub seed_file: Option<PathBuf>,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_REGION` - AWS region (default: "eu-central-1")
    /// - `DYNAMODB_ENDPOINT` - endpoint override (default: "http://host.docker.internal:8000",
    ///   empty to use the regional endpoint)
    /// - `TABLE_NAME` - table name (default: "QredMain")
    /// - `STORAGE_BACKEND` - "dynamodb" or "memory" (default: "dynamodb")
    /// - `SEED_FILE` - items for the memory backend (default: none)
    /// - `REQUEST_TIMEOUT_SECONDS` - request timeout (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let dynamodb_endpoint = match env::var("DYNAMODB_ENDPOINT") {
            Ok(endpoint) if endpoint.trim().is_empty() => None,
            Ok(endpoint) => Some(endpoint),
            Err(_) => Some(DEFAULT_DYNAMODB_ENDPOINT.to_string()),
        };

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(backend) => backend.parse()?,
            Err(_) => StorageBackend::default(),
        };

        Ok(Self {
            region: env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            dynamodb_endpoint,
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string()),
            storage,
            seed_file: env::var_os("SEED_FILE").map(PathBuf::from),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        })
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            dynamodb_endpoint: Some(DEFAULT_DYNAMODB_ENDPOINT.to_string()),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            storage: StorageBackend::default(),
            seed_file: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}
