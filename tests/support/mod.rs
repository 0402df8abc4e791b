use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway data root for CLI tests.
pub struct TestRoot {
    dir: TempDir,
}

impl TestRoot {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join(".taskdesk").join("state.json")
    }

    /// A taskdesk command acting as the given user.
    pub fn cmd(&self, user: u64) -> Command {
        let mut cmd = self.cmd_anonymous();
        cmd.env("TASKDESK_USER", user.to_string());
        cmd
    }

    /// A taskdesk command with no user identity at all.
    pub fn cmd_anonymous(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskdesk").expect("binary");
        cmd.env("TASKDESK_ROOT", self.dir.path());
        cmd.env_remove("TASKDESK_USER");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.dir.path().join("taskdesk.toml"), contents)
            .expect("write config");
    }
}

/// Parse a command's stdout as the JSON envelope and return it.
pub fn json_output(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|err| {
        panic!("stdout is not valid JSON ({err}):\n{stdout}");
    })
}
