//! Helpers shared by the binary-level tests.

#![allow(dead_code, clippy::panic)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Empty directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct ScratchDir(PathBuf);

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

impl std::ops::Deref for ScratchDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

/// Creates an empty scratch directory.
pub fn scratch_dir() -> ScratchDir {
    let dir = std::env::temp_dir().join(format!("pg-conncheck-cli-{}", uuid::Uuid::new_v4()));
    if let Err(e) = std::fs::create_dir_all(&dir) {
        panic!("create scratch dir: {e}");
    }
    ScratchDir(dir)
}

/// Writes `.env` into `dir`.
pub fn write_env(dir: &Path, contents: &str) {
    if let Err(e) = std::fs::write(dir.join(".env"), contents) {
        panic!("write .env: {e}");
    }
}

/// Runs the binary with `dir` as the working directory and a clean
/// `DATABASE_URI` / logging environment.
pub fn run_in(dir: &Path, extra_env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pg-conncheck"));
    cmd.current_dir(dir)
        .env_remove("DATABASE_URI")
        .env_remove("RUST_LOG")
        .env_remove("LOG_JSON");
    for (k, v) in extra_env {
        cmd.env(k, v);
    }
    match cmd.output() {
        Ok(output) => output,
        Err(e) => panic!("failed to spawn pg-conncheck: {e}"),
    }
}

/// Lossy stdout/stderr of a finished run.
pub fn streams(output: &Output) -> (String, String) {
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}
