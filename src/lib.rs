//! # pg-conncheck
//!
//! Preflight smoke test for a managed PostgreSQL database.
//!
//! Reads `DATABASE_URI` from a local `.env` file, opens one connection with
//! TLS verification disabled, and checks the database is readable and
//! writable by creating, filling, reading, and dropping a scratch table.
//! Meant to be run by hand before starting the application backend.
//!
//! ## Flow
//!
//! ```text
//! .env ──► ProbeConfig (config/)        preflight, no network
//!              │
//!              ▼
//!         ConnectionAttempt (domain/)   sslmode=require → sslmode=disable
//!              │
//!              ▼
//!         ConnectionTester (service/)   version → create → insert → select → drop
//!              │        │
//!              │        └── PostgresProbe (persistence/)  one PgConnection
//!              ▼
//!         Report (report.rs)            stdout / stderr
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod report;
pub mod service;
