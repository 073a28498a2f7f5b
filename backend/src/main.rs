//! Guest list entry-point: loads settings, prepares the database and serves
//! the REST API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use guest_list::inbound::http::health::HealthState;
use guest_list::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use guest_list::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let bind_addr = settings.bind_addr().wrap_err("invalid listener address")?;
    let rejection_status = settings
        .rejection_status()
        .wrap_err("invalid rejection status policy")?;
    let database_url = settings
        .database_url()
        .wrap_err("invalid database settings")?;
    let db_max_connections = settings
        .db_max_connections()
        .wrap_err("invalid connection pool size")?;

    // Either failure aborts startup.
    let applied = run_pending_migrations(&database_url)
        .await
        .wrap_err("failed to prepare the guests table")?;
    info!(applied, "database migrations complete");

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(db_max_connections))
        .await
        .wrap_err("failed to connect to the guest store")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, pool).with_rejection_status(rejection_status);
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, ?rejection_status, "guest list service listening");

    server.await.wrap_err("server terminated unexpectedly")
}
