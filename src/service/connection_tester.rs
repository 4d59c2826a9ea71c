//! Connection tester: opens one connection and runs the read/write check.

use std::io::Write;

use crate::config::ProbeConfig;
use crate::domain::{AttemptStatus, ConnectionAttempt};
use crate::error::ProbeError;
use crate::persistence::PostgresProbe;
use crate::persistence::postgres::TEST_MESSAGE;
use crate::report::Report;

/// Runs the end-to-end check for one configuration.
///
/// Sequence: connect → `SELECT version()` → create `connection_test` →
/// insert → read back latest row → drop table → close. Each step is
/// awaited before the next and the first failure ends the run. Nothing is
/// retried.
///
/// The connection is released in exactly one place for both outcomes. On
/// success a close error fails the run; after a failure a close error is
/// discarded. A failure between the create and drop steps leaves the table
/// behind.
#[derive(Debug)]
pub struct ConnectionTester<O, E> {
    attempt: ConnectionAttempt,
    report: Report<O, E>,
}

impl<O: Write, E: Write> ConnectionTester<O, E> {
    /// Creates a tester with a pending attempt for `config`.
    #[must_use]
    pub fn new(config: &ProbeConfig, report: Report<O, E>) -> Self {
        Self::from_attempt(ConnectionAttempt::new(config), report)
    }

    /// Creates a tester for an existing pending attempt.
    #[must_use]
    pub const fn from_attempt(attempt: ConnectionAttempt, report: Report<O, E>) -> Self {
        Self { attempt, report }
    }

    /// The attempt as it currently stands.
    #[must_use]
    pub const fn attempt(&self) -> &ConnectionAttempt {
        &self.attempt
    }

    /// Consumes the tester, returning the attempt and the report.
    pub fn into_parts(self) -> (ConnectionAttempt, Report<O, E>) {
        (self.attempt, self.report)
    }

    /// Runs the check and reports the outcome.
    ///
    /// The error has already been reported when this returns `Err`; the
    /// caller only needs to map it to an exit status.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProbeError`] raised by connect, any statement,
    /// or the final close.
    pub async fn run(&mut self) -> Result<(), ProbeError> {
        self.report.banner();
        self.report.connecting();

        let connected = PostgresProbe::connect(self.attempt.connection_string()).await;
        let mut probe = match connected {
            Ok(probe) => probe,
            Err(e) => return Err(self.fail(e)),
        };
        self.attempt.mark_connected();
        self.report.connected();

        let outcome = self.validate(&mut probe).await;
        self.release(probe, outcome).await
    }

    async fn validate(&mut self, probe: &mut PostgresProbe) -> Result<(), ProbeError> {
        let version = probe.server_version().await?;
        tracing::debug!(version = version.full(), "server version");
        self.report.version(version.label());

        probe.create_test_table().await?;
        probe.insert_test_row(TEST_MESSAGE).await?;

        let row = probe.latest_test_row().await?;
        tracing::debug!(
            id = row.id,
            created_at = ?row.created_at,
            "read back test row"
        );
        self.report.write_test(row.message());

        probe.drop_test_table().await?;
        self.report.cleaned_up();
        Ok(())
    }

    async fn release(
        &mut self,
        probe: PostgresProbe,
        outcome: Result<(), ProbeError>,
    ) -> Result<(), ProbeError> {
        match outcome {
            Ok(()) => {
                if let Err(e) = probe.close().await {
                    return Err(self.fail(e));
                }
                self.attempt.mark_verified();
                tracing::info!(status = %self.attempt.status(), "connection check passed");
                self.report.passed();
                Ok(())
            }
            Err(e) => {
                let e = self.fail(e);
                if let Err(close_err) = probe.close().await {
                    tracing::debug!(error = %close_err, "ignoring close failure after error");
                }
                Err(e)
            }
        }
    }

    fn fail(&mut self, error: ProbeError) -> ProbeError {
        let connected = self.attempt.status() == AttemptStatus::Connected;
        self.attempt.mark_failed(error.to_string());
        tracing::info!(connected, error = %error, "connection check failed");
        self.report.failed(&error);
        error
    }
}
