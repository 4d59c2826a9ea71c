//! Connection check error types with exit status mapping.
//!
//! [`ProbeError`] is the central error type for the checker. Each variant
//! belongs to one [`ErrorKind`], which decides how the failure is reported:
//! precondition failures carry a remediation hint, runtime failures are
//! followed by the generic troubleshooting checklist.

use std::path::PathBuf;

/// Broad classification of a [`ProbeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local setup is incomplete. Detected before any network activity.
    Precondition,
    /// Anything that went wrong while talking to the database.
    Runtime,
}

/// Error enum for the connection check.
///
/// # Exit Codes
///
/// | Kind         | Variants                                              | Exit |
/// |--------------|-------------------------------------------------------|------|
/// | Precondition | `MissingEnvFile`, `MissingDatabaseUri`, `InvalidEnvFile`, `ExpandedValue` | 1 |
/// | Runtime      | `Database`, `MissingRow`                              | 1    |
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The env file does not exist.
    #[error("{} file not found!", .0.display())]
    MissingEnvFile(PathBuf),

    /// Neither the env file nor the process environment define the URI.
    #[error("{var} not found in {} file!", .path.display())]
    MissingDatabaseUri {
        /// Name of the variable that was looked up.
        var: &'static str,
        /// Env file that was searched.
        path: PathBuf,
    },

    /// The env file exists but could not be parsed.
    #[error("could not read {}: {source}", .path.display())]
    InvalidEnvFile {
        /// Env file that failed to parse.
        path: PathBuf,
        /// Underlying parse or I/O error.
        #[source]
        source: dotenvy::Error,
    },

    /// The env file value contains a `$` that `.env` parsing would treat as
    /// a variable reference.
    #[error("{var} in {} contains `$`, which would be expanded as a variable!", .path.display())]
    ExpandedValue {
        /// Name of the affected variable.
        var: &'static str,
        /// Env file holding the value.
        path: PathBuf,
    },

    /// Connect, query, or close failure reported by the driver.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// A query that must return a row came back empty.
    #[error("no rows returned from {0}")]
    MissingRow(&'static str),
}

impl ProbeError {
    /// Returns the [`ErrorKind`] of this variant.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingEnvFile(_)
            | Self::MissingDatabaseUri { .. }
            | Self::InvalidEnvFile { .. }
            | Self::ExpandedValue { .. } => ErrorKind::Precondition,
            Self::Database(_) | Self::MissingRow(_) => ErrorKind::Runtime,
        }
    }

    /// Process exit status for this error. Every failure exits with `1`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        1
    }

    /// Setup hint printed under a precondition failure.
    ///
    /// Runtime errors return `None`; they are followed by the
    /// troubleshooting checklist instead.
    #[must_use]
    pub const fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::MissingEnvFile(_) => {
                Some("Run ./setup-supabase.sh first to configure your environment.")
            }
            Self::MissingDatabaseUri { .. } | Self::InvalidEnvFile { .. } => {
                Some("Please check your .env configuration.")
            }
            Self::ExpandedValue { .. } => {
                Some("Wrap the value in single quotes or write `$` as %24.")
            }
            Self::Database(_) | Self::MissingRow(_) => None,
        }
    }
}
