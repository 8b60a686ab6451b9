//! SessionSweeper - Background service that purges expired sessions.
//!
//! Drives [`DeleteExpiredSessionsHandler`] on a fixed interval until a
//! shutdown signal arrives.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 300s | Time between sweeps |
//! | `sweep_on_shutdown` | true | Run one last sweep before stopping |
//!
//! A failed sweep is logged and the loop waits for the next tick; the
//! handler itself never retries.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::application::{DeleteExpiredSessionsHandler, DeleteExpiredSessionsResult};
use crate::config::SessionsConfig;
use crate::domain::session::SessionError;

/// Configuration for the SessionSweeper service.
#[derive(Debug, Clone)]
pub struct SessionSweeperConfig {
    pub interval: Duration,
    pub sweep_on_shutdown: bool,
}

impl Default for SessionSweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
            sweep_on_shutdown: true,
        }
    }
}

impl SessionSweeperConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_sweep_on_shutdown(mut self, enabled: bool) -> Self {
        self.sweep_on_shutdown = enabled;
        self
    }
}

impl From<&SessionsConfig> for SessionSweeperConfig {
    fn from(config: &SessionsConfig) -> Self {
        Self {
            interval: config.sweep_interval(),
            sweep_on_shutdown: config.sweep_on_shutdown,
        }
    }
}

/// Background service that periodically deletes expired sessions.
pub struct SessionSweeper {
    handler: DeleteExpiredSessionsHandler,
    config: SessionSweeperConfig,
}

impl SessionSweeper {
    pub fn new(handler: DeleteExpiredSessionsHandler) -> Self {
        Self::with_config(handler, SessionSweeperConfig::default())
    }

    pub fn with_config(handler: DeleteExpiredSessionsHandler, config: SessionSweeperConfig) -> Self {
        Self { handler, config }
    }

    /// Run the sweep loop until the shutdown signal is received.
    ///
    /// Returns the number of sweeps that completed successfully.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut completed = 0;

        info!(interval_secs = self.config.interval.as_secs(), "Session sweeper started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    // A dropped sender counts as shutdown.
                    if changed.is_err() || *shutdown.borrow() {
                        if self.config.sweep_on_shutdown && self.sweep_once().await.is_ok() {
                            completed += 1;
                        }
                        info!(completed, "Session sweeper stopped");
                        return completed;
                    }
                }

                _ = interval.tick() => {
                    if self.sweep_once().await.is_ok() {
                        completed += 1;
                    }
                }
            }
        }
    }

    /// Run exactly one sweep.
    pub async fn sweep_once(&self) -> Result<DeleteExpiredSessionsResult, SessionError> {
        match self.handler.handle().await {
            Ok(result) => {
                debug!(purged = result.purged, "Sweep completed");
                Ok(result)
            }
            Err(e) => {
                error!(error = %e, "Sweep failed; waiting for next tick");
                Err(e)
            }
        }
    }
}
