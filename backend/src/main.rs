//! Backend entry-point: reads configuration, builds the pool and serves HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use dashboard::inbound::http::health::HealthState;
use dashboard::inbound::http::session_config::{BuildMode, session_settings_from_env};
use dashboard::outbound::persistence::DbPool;
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let mode = BuildMode::from_debug_assertions();
    let session = session_settings_from_env(&env, mode).map_err(std::io::Error::other)?;
    let settings = ServerSettings::from_env(&env).map_err(std::io::Error::other)?;
    let pool = DbPool::new(settings.pool)
        .await
        .map_err(|err| std::io::Error::other(err.into_message()))?;

    let config = ServerConfig::new(session, settings.bind_addr, pool);

    info!(bind_addr = %config.bind_addr(), "starting server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
