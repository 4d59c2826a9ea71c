//! pg-conncheck entry point.
//!
//! Runs the preflight check, then the connection test, and exits `0` only
//! when every step succeeded.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use pg_conncheck::config::{self, DEFAULT_ENV_FILE, ProbeConfig};
use pg_conncheck::report::Report;
use pg_conncheck::service::ConnectionTester;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let mut report = Report::stdio();

    // Preflight
    let config = match ProbeConfig::load(DEFAULT_ENV_FILE) {
        Ok(config) => config,
        Err(e) => {
            report.failed(&e);
            return ExitCode::from(e.exit_code());
        }
    };
    tracing::debug!(env_file = %config.env_file().display(), "configuration loaded");

    // Connection test
    let mut tester = ConnectionTester::new(&config, report);
    match tester.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(e.exit_code()),
    }
}

/// Logs go to stderr so they never interleave with the report on stdout.
/// `RUST_LOG` overrides the default `warn` filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config::log_json_enabled() {
        builder.json().init();
    } else {
        builder.init();
    }
}
