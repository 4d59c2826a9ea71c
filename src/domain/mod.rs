//! Domain layer: the connection attempt and its lifecycle.
//!
//! A run creates exactly one [`ConnectionAttempt`] from configuration and
//! advances its [`AttemptStatus`] as each step of the check succeeds.

pub mod attempt_status;
pub mod connection_attempt;

pub use attempt_status::AttemptStatus;
pub use connection_attempt::{ConnectionAttempt, test_connection_string};
