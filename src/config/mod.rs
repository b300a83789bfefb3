//! Configuration loading from the process environment

use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_NAME: &str = "DATABASE_NAME";
pub const ENV_PORT: &str = "PORT";
pub const ENV_STORAGE_BACKEND: &str = "STORAGE_BACKEND";

/// Which document store the binary wires up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    MongoDb,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StorageBackend::MongoDb),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Runtime configuration of the service
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Connection string of the document store
    pub database_url: Option<String>,

    /// Database holding the three collections
    pub database_name: Option<String>,

    pub host: String,
    pub port: u16,
    pub storage_backend: StorageBackend,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            database_name: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            storage_backend: StorageBackend::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values count as unset. Unparsable `PORT` or `STORAGE_BACKEND`
    /// values fall back to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var(ENV_PORT) {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
                tracing::warn!("Invalid {ENV_PORT} value '{raw}': {e}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
        };

        let storage_backend = match var(ENV_STORAGE_BACKEND) {
            None => StorageBackend::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Invalid {ENV_STORAGE_BACKEND}: {e}, using mongodb");
                StorageBackend::default()
            }),
        };

        Self {
            database_url: var(ENV_DATABASE_URL),
            database_name: var(ENV_DATABASE_NAME),
            host: DEFAULT_HOST.to_string(),
            port,
            storage_backend,
        }
    }

    /// Connection string and database name, when both are set
    pub fn database(&self) -> Option<(&str, &str)> {
        match (&self.database_url, &self.database_name) {
            (Some(url), Some(name)) => Some((url.as_str(), name.as_str())),
            _ => None,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
