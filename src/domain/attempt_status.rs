//! Lifecycle states of a connection attempt.

use std::fmt;

/// Progress of a [`super::ConnectionAttempt`].
///
/// States only move forward: `Pending → Connected → Verified`, or from
/// either non-terminal state to `Failed`. `Verified` and `Failed` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttemptStatus {
    /// Created from configuration, no network activity yet.
    #[default]
    Pending,
    /// The connection is open.
    Connected,
    /// Every validation statement succeeded.
    Verified,
    /// A step failed; see the attempt's last error.
    Failed,
}

impl AttemptStatus {
    /// Returns whether moving from `self` to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Connected)
                | (Self::Connected, Self::Verified)
                | (Self::Pending | Self::Connected, Self::Failed)
        )
    }

    /// Returns the snake_case label used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Connected => "connected",
            Self::Verified => "verified",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
