//! Row models read back during the check.

use chrono::NaiveDateTime;

/// A row from the `connection_test` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTestRow {
    /// `SERIAL` primary key.
    pub id: i32,
    /// Free-text message written by the insert step.
    pub test_message: Option<String>,
    /// Server-side insert time (`TIMESTAMP DEFAULT NOW()`).
    pub created_at: Option<NaiveDateTime>,
}

impl ConnectionTestRow {
    /// Message to display for the write test. A `NULL` column reads as
    /// an empty string.
    #[must_use]
    pub fn message(&self) -> &str {
        self.test_message.as_deref().unwrap_or_default()
    }
}

/// Result of `SELECT version()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerVersion {
    full: String,
}

impl ServerVersion {
    /// Wraps the full version string reported by the server.
    #[must_use]
    pub fn new(full: impl Into<String>) -> Self {
        Self { full: full.into() }
    }

    /// Full version string, e.g.
    /// `PostgreSQL 15.1 on aarch64-unknown-linux-gnu, compiled by gcc ...`.
    #[must_use]
    pub fn full(&self) -> &str {
        &self.full
    }

    /// First whitespace-delimited token, used as the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.full.split_whitespace().next().unwrap_or_default()
    }
}
