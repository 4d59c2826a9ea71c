//! Checker configuration loaded from a `.env` file.
//!
//! The preflight check lives here: the env file must exist and a non-empty
//! `DATABASE_URI` must be resolvable from it (or from the process
//! environment, which takes precedence the same way `dotenvy` never
//! overrides variables that are already set). Nothing in this module touches
//! the network.

use std::path::{Path, PathBuf};

use crate::error::ProbeError;

/// Name of the variable holding the PostgreSQL connection URI.
pub const DATABASE_URI_VAR: &str = "DATABASE_URI";

/// Env file looked up in the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Switches log output to JSON lines when truthy.
pub const LOG_JSON_VAR: &str = "LOG_JSON";

/// Resolved checker configuration.
///
/// Loaded once at startup via [`ProbeConfig::load`] and passed by reference
/// into the tester. Never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    env_file: PathBuf,
    database_uri: String,
}

impl ProbeConfig {
    /// Runs the preflight check against `env_file` and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// - [`ProbeError::MissingEnvFile`] if `env_file` does not exist.
    /// - [`ProbeError::InvalidEnvFile`] if it exists but cannot be parsed.
    /// - [`ProbeError::MissingDatabaseUri`] if no non-empty
    ///   `DATABASE_URI` is defined.
    /// - [`ProbeError::ExpandedValue`] if the file's `DATABASE_URI` holds an
    ///   unescaped `$` outside single quotes.
    pub fn load(env_file: impl Into<PathBuf>) -> Result<Self, ProbeError> {
        Self::load_with(env_file.into(), std::env::var(DATABASE_URI_VAR).ok())
    }

    fn load_with(env_file: PathBuf, from_process: Option<String>) -> Result<Self, ProbeError> {
        if !env_file.exists() {
            return Err(ProbeError::MissingEnvFile(env_file));
        }

        let from_file = read_env_var(&env_file, DATABASE_URI_VAR)?;
        let uses_file = from_process.as_deref().is_none_or(str::is_empty);
        if uses_file && from_file.is_some() {
            reject_expansion(&env_file, DATABASE_URI_VAR)?;
        }
        Self::resolve(env_file, from_process, from_file)
    }

    /// Picks the URI from the process value first, then the file value.
    /// Empty strings count as missing.
    fn resolve(
        env_file: PathBuf,
        from_process: Option<String>,
        from_file: Option<String>,
    ) -> Result<Self, ProbeError> {
        let database_uri = from_process
            .filter(|v| !v.is_empty())
            .or_else(|| from_file.filter(|v| !v.is_empty()));

        match database_uri {
            Some(database_uri) => Ok(Self {
                env_file,
                database_uri,
            }),
            None => Err(ProbeError::MissingDatabaseUri {
                var: DATABASE_URI_VAR,
                path: env_file,
            }),
        }
    }

    /// Returns the env file this configuration was read from.
    #[must_use]
    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    /// Returns the configured connection URI, untransformed.
    #[must_use]
    pub fn database_uri(&self) -> &str {
        &self.database_uri
    }
}

// The URI embeds the database password.
impl std::fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("env_file", &self.env_file)
            .field("database_uri", &"<redacted>")
            .finish()
    }
}

/// Reads `key` from the env file without exporting anything into the
/// process environment. The first definition wins.
fn read_env_var(path: &Path, key: &str) -> Result<Option<String>, ProbeError> {
    let invalid = |source| ProbeError::InvalidEnvFile {
        path: path.to_path_buf(),
        source,
    };

    for item in dotenvy::from_path_iter(path).map_err(invalid)? {
        let (k, v) = item.map_err(invalid)?;
        if k == key {
            return Ok(Some(v));
        }
    }
    Ok(None)
}

/// `dotenvy` substitutes `$NAME` in unquoted and double-quoted values, which
/// silently truncates a URI whose password contains `$`. Values are taken
/// literally only inside single quotes or when the `$` is escaped.
fn reject_expansion(path: &Path, key: &'static str) -> Result<(), ProbeError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ProbeError::InvalidEnvFile {
        path: path.to_path_buf(),
        source: dotenvy::Error::Io(e),
    })?;

    match raw_env_value(&contents, key) {
        Some(raw) if expands_variable(raw) => Err(ProbeError::ExpandedValue {
            var: key,
            path: path.to_path_buf(),
        }),
        _ => Ok(()),
    }
}

/// Text after `KEY=` on the first line defining `key`, before any unquoting.
fn raw_env_value<'a>(contents: &'a str, key: &str) -> Option<&'a str> {
    contents.lines().find_map(|line| {
        let line = line.trim_start();
        let line = line.strip_prefix("export ").map_or(line, str::trim_start);
        line.strip_prefix(key)?
            .trim_start()
            .strip_prefix('=')
            .map(str::trim)
    })
}

/// Whether an unescaped `$` in `raw` would be substituted. Trailing
/// ` # comments` on unquoted values are ignored.
fn expands_variable(raw: &str) -> bool {
    if raw.starts_with('\'') {
        return false;
    }
    let quoted = raw.starts_with('"');
    let mut prev = ' ';
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '$' => return true,
            '#' if !quoted && prev.is_whitespace() => return false,
            _ => {}
        }
        prev = c;
    }
    false
}

/// Returns whether JSON log output was requested via `LOG_JSON`.
#[must_use]
pub fn log_json_enabled() -> bool {
    parse_env_bool(LOG_JSON_VAR, false)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}
