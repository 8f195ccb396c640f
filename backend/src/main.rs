//! Backend entry-point: loads settings, prepares the store and serves the API.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use admissions::inbound::http::health::HealthState;
use admissions::inbound::http::session_config::fingerprint::key_fingerprint;
use admissions::inbound::http::session_config::{BuildMode, session_settings_from_env};
use admissions::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use admissions::settings::AppSettings;

use server::{ServerConfig, ServiceSettings, create_server};

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

    let settings = AppSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        ServiceSettings::from(&settings),
    );
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect_database(url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, seeding = settings.seeding_enabled, "starting admissions server");
    create_server(health_state, config)?.await
}

/// Apply pending migrations, then open the async pool.
async fn connect_database(url: &str) -> io::Result<DbPool> {
    let migration_url = url.to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(io::Error::other)?
        .map_err(io::Error::other)?;
    DbPool::new(PoolConfig::new(url))
        .await
        .map_err(io::Error::other)
}
