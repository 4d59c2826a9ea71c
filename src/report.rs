//! Human-readable console report.
//!
//! Progress and results go to the `out` stream, failures and remediation
//! text go to the `err` stream. Every line starts with a status glyph so a
//! developer can scan the output at a glance.

use std::io::{self, Stderr, Stdout, Write};

use crate::error::{ErrorKind, ProbeError};

/// Generic steps printed after any runtime failure.
pub const TROUBLESHOOTING: [&str; 5] = [
    "Verify your DATABASE_URI in .env",
    "Check your Supabase project is active",
    "Confirm your database password is correct",
    "Make sure your IP is allowlisted in Supabase",
    "Check Supabase project status at dashboard",
];

const BANNER: &str = "🔌 Testing Supabase database connection...";
const BANNER_RULE: &str = "==========================================";

/// Console report writer.
///
/// Write errors on the console streams are ignored; there is nowhere left
/// to report them.
#[derive(Debug)]
pub struct Report<O, E> {
    out: O,
    err: E,
}

impl Report<Stdout, Stderr> {
    /// Report on the process's standard output and standard error.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Report<O, E> {
    /// Creates a report over arbitrary writers.
    #[must_use]
    pub const fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Consumes the report and returns the two writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    /// Banner printed before anything else.
    pub fn banner(&mut self) {
        self.line(BANNER);
        self.line(BANNER_RULE);
    }

    /// About to open the connection.
    pub fn connecting(&mut self) {
        self.line("Connecting to database...");
    }

    /// The connection is open.
    pub fn connected(&mut self) {
        self.line("✅ Successfully connected to Supabase!");
    }

    /// Display label of the server version.
    pub fn version(&mut self, label: &str) {
        self.line(&format!("📊 Database version: {label}"));
    }

    /// Message read back by the write test.
    pub fn write_test(&mut self, message: &str) {
        self.line(&format!("✅ Write test successful: {message}"));
    }

    /// The test table was dropped.
    pub fn cleaned_up(&mut self) {
        self.line("🧹 Cleaned up test table");
    }

    /// Closing summary after a fully successful run.
    pub fn passed(&mut self) {
        self.line("");
        self.line("🎉 Database connection test passed!");
        self.line("   Your PayloadCMS backend is ready to connect to Supabase.");
        self.line("");
        self.line("Next step: Run ./dev-scripts.sh backend:dev");
    }

    /// Reports `error` according to its [`ErrorKind`]: precondition
    /// failures get their remediation hint, runtime failures the
    /// troubleshooting checklist.
    pub fn failed(&mut self, error: &ProbeError) {
        match error.kind() {
            ErrorKind::Precondition => self.precondition_failed(error),
            ErrorKind::Runtime => self.runtime_failed(error),
        }
    }

    fn precondition_failed(&mut self, error: &ProbeError) {
        self.err_line(&format!("❌ {error}"));
        if let Some(hint) = error.remediation() {
            self.err_line(&format!("   {hint}"));
        }
    }

    fn runtime_failed(&mut self, error: &ProbeError) {
        self.err_line("❌ Connection test failed:");
        self.err_line(&format!("Error: {error}"));
        self.err_line("");
        self.err_line("🔧 Troubleshooting:");
        for (n, step) in TROUBLESHOOTING.iter().enumerate() {
            self.err_line(&format!("   {}. {step}", n + 1));
        }
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn err_line(&mut self, text: &str) {
        let _ = writeln!(self.err, "{text}");
    }
}
