//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_REGISTRY_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::validation::DEFAULT_MIN_AGE;
use crate::outbound::persistence::DEFAULT_POOL_MAX_SIZE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values for the user registry service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_REGISTRY")]
pub struct AppSettings {
    /// Minimum age, in whole years, a user must have reached.
    pub min_age: Option<u32>,
    /// PostgreSQL connection string. Without one, users are kept in memory.
    pub database_url: Option<String>,
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Return the configured minimum age, falling back to 18.
    #[must_use]
    pub fn min_age(&self) -> u32 {
        self.min_age.unwrap_or(DEFAULT_MIN_AGE)
    }

    /// Return the database URL when one is configured and non-blank.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the bind address, falling back to `0.0.0.0:8080`.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the pool size, falling back to the pool default.
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
