//! User registry entry-point: loads configuration, prepares storage and
//! serves the REST API with health probes and OpenAPI docs.

mod server;

use std::io;
use std::net::SocketAddr;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_registry::inbound::http::health::HealthState;
use user_registry::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use user_registry::settings::AppSettings;

/// Turn loaded settings into a server configuration, connecting to
/// PostgreSQL when a URL is configured.
async fn server_config(settings: &AppSettings) -> io::Result<ServerConfig> {
    let bind_addr: SocketAddr = settings.bind_addr().parse().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid bind address {}: {e}", settings.bind_addr()),
        )
    })?;
    let config = ServerConfig::new(bind_addr).with_min_age(settings.min_age());

    let Some(database_url) = settings.database_url() else {
        return Ok(config);
    };

    if settings.run_migrations {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(|e| io::Error::other(format!("database migration failed: {e}")))?;
        info!(applied, "database migrations applied");
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(|e| io::Error::other(format!("database pool setup failed: {e}")))?;
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let config = server_config(&settings).await?;
    info!(bind_addr = %config.bind_addr, min_age = settings.min_age(), "starting user registry");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
