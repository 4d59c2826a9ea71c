//! The single connection attempt made per run.
//!
//! [`ConnectionAttempt`] carries the connection string actually used to
//! connect (after the `sslmode` rewrite) and tracks how far the run got.

use std::fmt;

use super::AttemptStatus;
use crate::config::ProbeConfig;

/// Query fragment rewritten before connecting.
pub const SSLMODE_REQUIRE: &str = "sslmode=require";

/// Replacement for [`SSLMODE_REQUIRE`]; local testing skips TLS.
pub const SSLMODE_DISABLE: &str = "sslmode=disable";

/// Derives the connection string used for the check.
///
/// The first `sslmode=require` is replaced with `sslmode=disable`. Any other
/// string is returned unchanged.
#[must_use]
pub fn test_connection_string(database_uri: &str) -> String {
    database_uri.replacen(SSLMODE_REQUIRE, SSLMODE_DISABLE, 1)
}

/// One run's connection attempt.
///
/// Created from [`ProbeConfig`] in the `Pending` state and advanced by the
/// tester as each step succeeds. `last_error` is only ever set together
/// with the `Failed` status.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionAttempt {
    connection_string: String,
    status: AttemptStatus,
    last_error: Option<String>,
}

impl ConnectionAttempt {
    /// Creates a pending attempt for the configured URI.
    #[must_use]
    pub fn new(config: &ProbeConfig) -> Self {
        Self::from_uri(config.database_uri())
    }

    /// Creates a pending attempt from a raw URI.
    #[must_use]
    pub fn from_uri(database_uri: &str) -> Self {
        Self {
            connection_string: test_connection_string(database_uri),
            status: AttemptStatus::Pending,
            last_error: None,
        }
    }

    /// Connection string after the `sslmode` rewrite.
    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> AttemptStatus {
        self.status
    }

    /// Failure message, present only when the status is `Failed`.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Records that the connection is open.
    ///
    /// Returns `false` and leaves the attempt untouched if it was not
    /// pending.
    pub fn mark_connected(&mut self) -> bool {
        self.advance(AttemptStatus::Connected)
    }

    /// Records that every validation statement succeeded.
    ///
    /// Returns `false` and leaves the attempt untouched if it was not
    /// connected.
    pub fn mark_verified(&mut self) -> bool {
        self.advance(AttemptStatus::Verified)
    }

    /// Records a failure and its message.
    ///
    /// Returns `false` and leaves the attempt untouched if it had already
    /// reached a terminal state.
    pub fn mark_failed(&mut self, message: impl Into<String>) -> bool {
        if !self.advance(AttemptStatus::Failed) {
            return false;
        }
        self.last_error = Some(message.into());
        true
    }

    fn advance(&mut self, next: AttemptStatus) -> bool {
        if !self.status.can_transition_to(next) {
            tracing::warn!(from = %self.status, to = %next, "ignored invalid attempt transition");
            return false;
        }
        tracing::debug!(from = %self.status, to = %next, "attempt status changed");
        self.status = next;
        true
    }
}

// The connection string embeds the database password.
impl fmt::Debug for ConnectionAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionAttempt")
            .field("connection_string", &"<redacted>")
            .field("status", &self.status)
            .field("last_error", &self.last_error)
            .finish()
    }
}
