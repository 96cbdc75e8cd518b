//! Configuration loader with layered sources.

use crate::AppConfig;
use behemoth_core::BehemothError;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Environment variable selecting the `{environment}.toml` overlay.
pub const ENVIRONMENT_VAR: &str = "BEHEMOTH_ENVIRONMENT";

/// Prefix of configuration overrides taken from the process environment.
pub const ENV_PREFIX: &str = "BEHEMOTH";

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
    environment: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `BEHEMOTH__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, BehemothError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::with_environment(config_dir, environment)
    }

    /// Creates a loader for an explicit environment name.
    pub fn with_environment(
        config_dir: impl Into<String>,
        environment: impl Into<String>,
    ) -> Result<Self, BehemothError> {
        let config_dir = config_dir.into();
        let environment = environment.into();
        let config = Self::load_config(&config_dir, &environment)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
            environment,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, BehemothError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), BehemothError> {
        let new_config = Self::load_config(&self.config_dir, &self.environment)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str, environment: &str) -> Result<AppConfig, BehemothError> {
        info!("Loading configuration for environment: {}", environment);

        // The selected overlay always names the environment.
        let mut builder = Config::builder()
            .set_override("app.environment", environment)
            .map_err(config_error_to_behemoth_error)?;

        for name in ["default", environment, "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        // BEHEMOTH__CACHE__KEY_PREFIX -> cache.key_prefix
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_behemoth_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_behemoth_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Rejects configurations the service cannot run with.
pub fn validate_config(config: &AppConfig) -> Result<(), BehemothError> {
    if config.app.is_production() && config.security.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("Using default JWT secret in production! This is a security risk.");
    }

    if config.database.url.trim().is_empty() {
        return Err(BehemothError::Configuration("Database URL is required".to_string()));
    }

    if config.cache.profile_expiration_minutes == Some(0) {
        return Err(BehemothError::Configuration(
            "cache.profile_expiration_minutes must be positive; omit it to disable expiration"
                .to_string(),
        ));
    }

    if config.storage.container.trim().is_empty() {
        return Err(BehemothError::Configuration(
            "storage.container must not be empty".to_string(),
        ));
    }

    if config.app.is_production() && config.security.local_auth_simulator {
        return Err(BehemothError::Configuration(
            "security.local_auth_simulator cannot be enabled in production".to_string(),
        ));
    }

    if config.startup.max_attempts == 0 {
        return Err(BehemothError::Configuration(
            "startup.max_attempts must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn config_error_to_behemoth_error(err: ConfigError) -> BehemothError {
    BehemothError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.key_prefix, "cache_");
        assert!(config.cache.profile_ttl().is_none());
        assert_eq!(config.storage.container, "avatars");
        assert!(validate_config(&config).is_ok());
    }

    #[tokio::test]
    async fn test_layers_override_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "default.toml",
            "[server]\nport = 9000\n\n[cache]\nprofile_expiration_minutes = 60\n",
        );
        write(dir.path(), "staging.toml", "[server]\nport = 9100\n");
        write(dir.path(), "local.toml", "[cache]\nkey_prefix = \"dev_\"\n");

        let loader =
            ConfigLoader::with_environment(dir.path().to_string_lossy(), "staging").unwrap();
        let config = loader.get().await;

        assert_eq!(config.app.environment, "staging");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.cache.key_prefix, "dev_");
        assert_eq!(config.cache.profile_ttl(), Some(Duration::from_secs(3600)));
        // Untouched sections keep their defaults.
        assert_eq!(config.storage.container, "avatars");
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", "[server]\nport = 9000\n");

        let loader =
            ConfigLoader::with_environment(dir.path().to_string_lossy(), "test").unwrap();
        assert_eq!(loader.get().await.server.port, 9000);

        write(dir.path(), "default.toml", "[server]\nport = 9001\n");
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.server.port, 9001);
    }

    #[test]
    fn test_missing_directory_uses_defaults() {
        let loader = ConfigLoader::with_environment("/nonexistent/behemoth", "test").unwrap();
        let config = loader.config.try_read().unwrap().clone();
        assert_eq!(config.redis.pool_size, 10);
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "default.toml",
            "[cache]\nprofile_expiration_minutes = 0\n",
        );

        let result = ConfigLoader::with_environment(dir.path().to_string_lossy(), "test");
        assert!(matches!(result, Err(BehemothError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.storage.container = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_auth_simulator_not_allowed_in_production() {
        let mut config = AppConfig::default();
        config.security.local_auth_simulator = true;
        assert!(validate_config(&config).is_ok());

        config.app.environment = "production".to_string();
        assert!(validate_config(&config).is_err());
    }
}
