//! PostgreSQL implementation of the validation statements.

use std::str::FromStr;

use chrono::NaiveDateTime;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use super::models::{ConnectionTestRow, ServerVersion};
use crate::error::ProbeError;

/// Table created, written, read, and dropped by the check.
pub const TEST_TABLE: &str = "connection_test";

/// Message inserted by the write step.
pub const TEST_MESSAGE: &str = "Connection test successful!";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS connection_test (\
     id SERIAL PRIMARY KEY, \
     test_message TEXT, \
     created_at TIMESTAMP DEFAULT NOW())";

const INSERT_SQL: &str = "INSERT INTO connection_test (test_message) VALUES ($1)";

const SELECT_LATEST_SQL: &str = "SELECT id, test_message, created_at FROM connection_test \
     ORDER BY created_at DESC LIMIT 1";

const DROP_TABLE_SQL: &str = "DROP TABLE connection_test";

/// A single open connection to the database under test.
///
/// Not a pool: the check needs exactly one connection, opened by
/// [`PostgresProbe::connect`] and released by [`PostgresProbe::close`].
#[derive(Debug)]
pub struct PostgresProbe {
    conn: PgConnection,
}

impl PostgresProbe {
    /// Parses `connection_string` and opens a connection.
    ///
    /// No connect timeout is applied.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError::Database`] if the string is not a valid
    /// PostgreSQL URI or the connection cannot be established.
    pub async fn connect(connection_string: &str) -> Result<Self, ProbeError> {
        let options = PgConnectOptions::from_str(connection_string)?;
        tracing::debug!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or_default(),
            "opening connection"
        );

        let conn = PgConnection::connect_with(&options).await?;
        Ok(Self { conn })
    }

    /// Runs `SELECT version()`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError::Database`] on query failure.
    pub async fn server_version(&mut self) -> Result<ServerVersion, ProbeError> {
        let full = sqlx::query_scalar::<_, String>("SELECT version()")
            .fetch_one(&mut self.conn)
            .await?;

        Ok(ServerVersion::new(full))
    }

    /// Creates the `connection_test` table if it does not already exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError::Database`] on failure, e.g. missing
    /// `CREATE` privilege.
    pub async fn create_test_table(&mut self) -> Result<(), ProbeError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&mut self.conn).await?;
        tracing::debug!(table = TEST_TABLE, "test table ready");
        Ok(())
    }

    /// Inserts one row carrying `message`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError::Database`] on failure.
    pub async fn insert_test_row(&mut self, message: &str) -> Result<(), ProbeError> {
        sqlx::query(INSERT_SQL)
            .bind(message)
            .execute(&mut self.conn)
            .await?;

        Ok(())
    }

    /// Loads the most recently created row.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError::Database`] on failure, or
    /// [`ProbeError::MissingRow`] if the table is empty.
    pub async fn latest_test_row(&mut self) -> Result<ConnectionTestRow, ProbeError> {
        let row = sqlx::query_as::<_, (i32, Option<String>, Option<NaiveDateTime>)>(
            SELECT_LATEST_SQL,
        )
        .fetch_optional(&mut self.conn)
        .await?;

        let Some((id, test_message, created_at)) = row else {
            return Err(ProbeError::MissingRow(TEST_TABLE));
        };

        Ok(ConnectionTestRow {
            id,
            test_message,
            created_at,
        })
    }

    /// Drops the `connection_test` table.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError::Database`] on failure.
    pub async fn drop_test_table(&mut self) -> Result<(), ProbeError> {
        sqlx::query(DROP_TABLE_SQL).execute(&mut self.conn).await?;
        tracing::debug!(table = TEST_TABLE, "test table dropped");
        Ok(())
    }

    /// Sends a graceful terminate and closes the socket.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError::Database`] if the terminate message cannot
    /// be written.
    pub async fn close(self) -> Result<(), ProbeError> {
        self.conn.close().await?;
        Ok(())
    }
}
