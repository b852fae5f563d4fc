//! Common test utilities for presswork integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch the
//! user's real data directory. The `pw()` method returns a `Command` that
//! sets `PW_DATA_DIR` per-invocation, making tests parallel-safe.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with isolated data storage.
pub struct TestEnv {
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with an isolated data directory.
    pub fn new() -> Self {
        Self {
            data_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a new test environment and initialize presswork in it.
    pub fn init() -> Self {
        let env = Self::new();
        env.pw().args(["system", "init"]).assert().success();
        env
    }

    /// Get a Command for the pw binary with isolated data directory.
    pub fn pw(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pw"));
        cmd.env("PW_DATA_DIR", self.data_dir.path());
        cmd
    }

    /// Run a command and parse its JSON output.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.pw().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
