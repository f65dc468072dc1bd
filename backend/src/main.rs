//! Portal entry point: settings, store selection, seeding and the server.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use vaccine_portal::config::PortalSettings;
use vaccine_portal::inbound::http::health::HealthState;
use vaccine_portal::inbound::http::session_config::fingerprint::key_fingerprint;
use vaccine_portal::inbound::http::session_config::{BuildMode, session_settings_from_env};
use vaccine_portal::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{ServerConfig, create_server, seed_store};

/// Start-up failures surfaced from `main`.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to load settings: {0}")]
    Settings(String),
    #[error(transparent)]
    InvalidSettings(#[from] vaccine_portal::config::SettingsError),
    #[error(transparent)]
    Session(#[from] vaccine_portal::inbound::http::session_config::SessionConfigError),
    #[error(transparent)]
    Migrations(#[from] vaccine_portal::outbound::persistence::MigrationError),
    #[error(transparent)]
    Pool(#[from] vaccine_portal::outbound::persistence::PoolError),
    #[error("failed to seed default vaccines: {0}")]
    Seed(vaccine_portal::domain::Error),
}

impl From<StartupError> for std::io::Error {
    fn from(err: StartupError) -> Self {
        std::io::Error::other(err.to_string())
    }
}

async fn build_config() -> Result<ServerConfig, StartupError> {
    let settings =
        PortalSettings::load().map_err(|err| StartupError::Settings(err.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr()?,
    )
    .with_admin(settings.admin_credentials()?);

    let config = match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url).await?;
            let pool = DbPool::new(PoolConfig::new(url)).await?;
            info!("using PostgreSQL store");
            config.with_db_pool(pool)
        }
        None => {
            warn!("PORTAL_DATABASE_URL not set; data is kept in memory only");
            config
        }
    };

    if settings.seed_defaults {
        seed_store(config.store())
            .await
            .map_err(StartupError::Seed)?;
    }
    Ok(config)
}

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

    let config = build_config().await?;
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
