//! Configuration management for the bookstore server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::str::FromStr;

/// Connection target used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/books";
/// Connection target used whenever `RUN_MODE=test`
pub const TEST_DATABASE_URL: &str = "postgres://localhost/books-test";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Credential applied to the connection options, taken from `PGPASSWORD`
    pub password: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let server = ServerConfig::default();
        let database = DatabaseConfig::default();
        let logging = LoggingConfig::default();

        let config = Config::builder()
            .set_default("server.host", server.host)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("database.max_connections", i64::from(database.max_connections))?
            .set_default("database.min_connections", i64::from(database.min_connections))?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format)?
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. BOOKSTORE__SERVER__PORT)
            .add_source(
                Environment::with_prefix("BOOKSTORE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override(
                "database.url",
                resolve_database_url(&run_mode, env::var("DATABASE_URL").ok()),
            )?
            .set_override_option("database.password", env::var("PGPASSWORD").ok())?
            .build()?;

        config.try_deserialize()
    }
}

/// Pick the connection target for the given run mode.
///
/// In test mode `DATABASE_URL` is ignored.
pub fn resolve_database_url(run_mode: &str, database_url: Option<String>) -> String {
    if run_mode == "test" {
        return TEST_DATABASE_URL.to_string();
    }
    database_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

impl DatabaseConfig {
    /// Connection options for the pool, with the credential applied
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = PgConnectOptions::from_str(&self.url)?;
        Ok(match &self.password {
            Some(password) => options.password(password),
            None => options,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            password: None,
            max_connections: 10,
            min_connections: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
