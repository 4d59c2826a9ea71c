//! Persistence layer: the statements run against the target database.
//!
//! [`PostgresProbe`] owns the single `sqlx::PgConnection` opened per run and
//! exposes one method per validation step on the `connection_test` table.

pub mod models;
pub mod postgres;

pub use models::{ConnectionTestRow, ServerVersion};
pub use postgres::PostgresProbe;
