use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::image_store::DEFAULT_MAX_CONCURRENT_UPLOADS;

/// Settings of the external image hosting service.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ImageStoreConfig {
    /// Base URL of the upload API, without the cloud name.
    pub api_base: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Preset used for uploads.
    pub upload_preset: String,
    pub max_concurrent_uploads: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ImageStoreConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.cloudinary.com/v1_1".to_string(),
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            upload_preset: String::new(),
            max_concurrent_uploads: DEFAULT_MAX_CONCURRENT_UPLOADS,
            timeout_secs: 30,
        }
    }
}

/// Configuration of the catalog server.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    #[serde(default)]
    pub image_store: ImageStoreConfig,
}

impl ServerConfig {
    /// Load settings from `config/default.yaml`, the optional
    /// `config/{APP_ENV}.yaml` overlay and `APP__*` environment variables,
    /// in increasing precedence.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        Self::load_from(
            Path::new("config"),
            &app_env,
            Environment::with_prefix("APP").separator("__"),
        )
    }

    fn load_from(
        dir: &Path,
        app_env: &str,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let default_file = dir.join("default");
        let env_file = dir.join(app_env);

        Config::builder()
            .set_default("address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "catalog.db")?
            .add_source(File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(File::with_name(&env_file.to_string_lossy()).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;
    use tempfile::TempDir;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let source: Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Environment::with_prefix("APP")
            .separator("__")
            .source(Some(source))
    }

    fn config_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("default.yaml"),
            "port: 9000\ndatabase_url: default.db\nimage_store:\n  cloud_name: base\n  max_concurrent_uploads: 2\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("staging.yaml"),
            "database_url: staging.db\nimage_store:\n  cloud_name: staging\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn falls_back_to_built_in_defaults() {
        let dir = TempDir::new().unwrap();

        let config = ServerConfig::load_from(dir.path(), "local", environment(&[])).unwrap();

        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "catalog.db");
        assert_eq!(config.image_store.max_concurrent_uploads, 4);
        assert_eq!(config.image_store.timeout_secs, 30);
    }

    #[test]
    fn environment_file_overrides_default_file() {
        let dir = config_dir();

        let config = ServerConfig::load_from(dir.path(), "staging", environment(&[])).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.database_url, "staging.db");
        assert_eq!(config.image_store.cloud_name, "staging");
        assert_eq!(config.image_store.max_concurrent_uploads, 2);
    }

    #[test]
    fn variables_override_files() {
        let dir = config_dir();

        let config = ServerConfig::load_from(
            dir.path(),
            "staging",
            environment(&[
                ("APP__DATABASE_URL", "env.db"),
                ("APP__IMAGE_STORE__API_KEY", "key-123"),
            ]),
        )
        .unwrap();

        assert_eq!(config.database_url, "env.db");
        assert_eq!(config.image_store.api_key, "key-123");
        assert_eq!(config.image_store.cloud_name, "staging");
    }
}
