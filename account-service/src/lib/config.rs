use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret used to sign access tokens. There is no fallback value:
    /// loading fails unless a config file or environment supplies one.
    pub secret: String,
    pub expiration_hours: i64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-wide, so the missing-value and
    // override paths share one test instead of racing across threads.
    #[test]
    fn test_load_reads_environment_overrides() {
        env::set_var("RUN_MODE", "test");
        for key in [
            "DATABASE__URL",
            "SERVER__HTTP_PORT",
            "JWT__SECRET",
            "JWT__EXPIRATION_HOURS",
        ] {
            env::remove_var(key);
        }

        // No config file is reachable from the test working directory, so
        // every required field must come from the environment.
        assert!(Config::load().is_err());

        env::set_var("DATABASE__URL", "postgres://localhost:5432/accounts_test");
        env::set_var("SERVER__HTTP_PORT", "8081");
        env::set_var("JWT__SECRET", "env-secret-at-least-32-bytes-long!!!");
        env::set_var("JWT__EXPIRATION_HOURS", "12");

        let config = Config::load().expect("Failed to load config from environment");

        assert_eq!(config.database.url, "postgres://localhost:5432/accounts_test");
        assert_eq!(config.server.http_port, 8081);
        assert_eq!(config.jwt.secret, "env-secret-at-least-32-bytes-long!!!");
        assert_eq!(config.jwt.expiration_hours, 12);
    }
}
