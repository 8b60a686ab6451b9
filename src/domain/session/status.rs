//! SessionStatus enum describing where a session sits in its lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a session.
///
/// Only `Revoked` is ever stored. `Expired` is recomputed from the
/// expiration instant every time it is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Active,
    Expired,
    Revoked,
}

impl SessionStatus {
    /// Returns true if the session can still authenticate requests.
    pub fn is_usable(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Active -> Expired (time-derived)
    /// - Active -> Revoked
    pub fn can_transition_to(&self, target: &SessionStatus) -> bool {
        use SessionStatus::*;
        matches!((self, target), (Active, Expired) | (Active, Revoked))
    }

    /// Returns true for states with no way out.
    pub fn is_terminal(&self) -> bool {
        !self.is_usable()
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Active => "active",
            SessionStatus::Expired => "expired",
            SessionStatus::Revoked => "revoked",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(SessionStatus::default(), SessionStatus::Active);
    }

    #[test]
    fn only_active_is_usable() {
        assert!(SessionStatus::Active.is_usable());
        assert!(!SessionStatus::Expired.is_usable());
        assert!(!SessionStatus::Revoked.is_usable());
    }

    #[test]
    fn active_leaves_to_either_terminal_state() {
        assert!(SessionStatus::Active.can_transition_to(&SessionStatus::Expired));
        assert!(SessionStatus::Active.can_transition_to(&SessionStatus::Revoked));
    }

    #[test]
    fn terminal_states_have_no_exit() {
        for from in [SessionStatus::Expired, SessionStatus::Revoked] {
            assert!(from.is_terminal());
            for to in [SessionStatus::Active, SessionStatus::Expired, SessionStatus::Revoked] {
                assert!(!from.can_transition_to(&to));
            }
        }
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_string(&SessionStatus::Revoked).unwrap(), "\"revoked\"");
    }
}
