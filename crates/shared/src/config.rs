//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Ledger and route storage selection.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

/// Database configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL. Required for the postgres backend.
    #[serde(default)]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Which implementation backs the ledger and route providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL through SeaORM.
    #[default]
    Postgres,
    /// Process-local maps; state is lost on restart.
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StorageBackend,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `FUELEU__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FUELEU").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Returns true when the selected backend has what it needs to start.
    #[must_use]
    pub fn is_storage_configured(&self) -> bool {
        match self.storage.backend {
            StorageBackend::Postgres => !self.database.url.trim().is_empty(),
            StorageBackend::Memory => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars(
            [
                ("FUELEU__DATABASE__URL", None::<&str>),
                ("FUELEU__STORAGE__BACKEND", None),
                ("FUELEU__SERVER__PORT", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.server.port, 3000);
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.storage.backend, StorageBackend::Postgres);
                assert!(!config.is_storage_configured());
            },
        );
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("FUELEU__DATABASE__URL", Some("postgres://localhost/fueleu")),
                ("FUELEU__SERVER__PORT", Some("8081")),
                ("FUELEU__STORAGE__BACKEND", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/fueleu");
                assert_eq!(config.server.port, 8081);
                assert!(config.is_storage_configured());
            },
        );
    }

    #[test]
    fn test_memory_backend_needs_no_database() {
        temp_env::with_vars(
            [
                ("FUELEU__STORAGE__BACKEND", Some("memory")),
                ("FUELEU__DATABASE__URL", None),
                ("FUELEU__SERVER__PORT", None),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.storage.backend, StorageBackend::Memory);
                assert!(config.is_storage_configured());
            },
        );
    }
}
