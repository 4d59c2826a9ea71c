//! Service layer: the end-to-end connection check.
//!
//! [`ConnectionTester`] drives one [`crate::domain::ConnectionAttempt`]
//! through the validation sequence against [`crate::persistence::PostgresProbe`]
//! and writes the outcome to a [`crate::report::Report`].

pub mod connection_tester;

pub use connection_tester::ConnectionTester;
