//! Session lifecycle configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::foundation::Timestamp;

const MAX_TTL_MINUTES: i64 = 30 * 24 * 60;

/// Session lifetime and sweep settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    /// Lifetime applied when the caller has no expiry of its own
    #[serde(default = "default_ttl_minutes")]
    pub default_ttl_minutes: i64,

    /// Seconds between expired-session sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Run one last sweep while shutting down
    #[serde(default = "default_sweep_on_shutdown")]
    pub sweep_on_shutdown: bool,
}

impl SessionsConfig {
    /// Expiry for a session issued at `issued_at` under the default TTL.
    pub fn default_expiry(&self, issued_at: Timestamp) -> Timestamp {
        issued_at.plus_minutes(self.default_ttl_minutes)
    }

    /// Get sweep interval as Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_TTL_MINUTES).contains(&self.default_ttl_minutes) {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            default_ttl_minutes: default_ttl_minutes(),
            sweep_interval_secs: default_sweep_interval(),
            sweep_on_shutdown: default_sweep_on_shutdown(),
        }
    }
}

fn default_ttl_minutes() -> i64 {
    60
}

fn default_sweep_interval() -> u64 {
    300
}

fn default_sweep_on_shutdown() -> bool {
    true
}
