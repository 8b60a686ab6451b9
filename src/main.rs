//! Session maintenance service.
//!
//! Loads configuration, picks the session store and runs the expired-session
//! sweeper until Ctrl-C.

use std::error::Error;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use backoffice_sessions::adapters::{
    postgres, InMemorySessionRepository, PostgresSessionRepository, SessionSweeper,
    SessionSweeperConfig,
};
use backoffice_sessions::application::DeleteExpiredSessionsHandler;
use backoffice_sessions::config::AppConfig;
use backoffice_sessions::ports::SessionRepository;

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config)?;
    config.validate()?;

    let repository: Arc<dyn SessionRepository> = match &config.database {
        Some(database) => {
            let pool = postgres::connect(database).await?;
            info!("Using PostgreSQL session store");
            Arc::new(PostgresSessionRepository::new(pool))
        }
        None => {
            warn!("No database configured; sessions are kept in memory");
            Arc::new(InMemorySessionRepository::new())
        }
    };

    let sweeper = SessionSweeper::with_config(
        DeleteExpiredSessionsHandler::new(repository),
        SessionSweeperConfig::from(&config.sessions),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    shutdown_tx.send(true)?;

    let completed = worker.await?;
    info!(completed, "Session maintenance stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().try_init()?;
    } else {
        builder.compact().try_init()?;
    }
    Ok(())
}
