//! User service configuration.

use common::{env_parse, DatabaseConfig};

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Connection pool settings
    pub database: DatabaseConfig,
    /// Apply pending migrations on startup (`DB_RUN_MIGRATIONS`)
    pub run_migrations: bool,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(),
            run_migrations: env_parse("DB_RUN_MIGRATIONS").unwrap_or(true),
        }
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            run_migrations: true,
        }
    }
}
