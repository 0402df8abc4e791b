//! On-disk layout and snapshot persistence.
//!
//! All state lives under a data root directory:
//!
//! ```text
//! <root>/taskdesk.toml          configuration (optional)
//! <root>/.taskdesk/state.json   entity store snapshot
//! <root>/.taskdesk/state.json.lock
//! ```
//!
//! The snapshot is the whole `Repository` serialized as pretty JSON and
//! replaced atomically. A missing snapshot loads as the seeded demo dataset,
//! so a fresh root behaves like a freshly started server.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::repo::Repository;

const STATE_DIR: &str = ".taskdesk";
const STATE_FILE: &str = "state.json";
const CONFIG_FILE: &str = "taskdesk.toml";

/// Handle to a data root directory.
#[derive(Debug, Clone)]
pub struct DataRoot {
    root: PathBuf,
}

impl DataRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.join(STATE_DIR).join(STATE_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(STATE_DIR).join(format!("{STATE_FILE}.lock"))
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Load configuration from the root, falling back to defaults.
    pub fn config(&self) -> Config {
        Config::load_from_root(&self.root)
    }

    /// Take the exclusive store lock. Held across read-modify-write so
    /// concurrent processes serialize on the snapshot.
    pub fn lock(&self) -> Result<FileLock> {
        FileLock::acquire(self.lock_path(), DEFAULT_LOCK_TIMEOUT_MS)
    }

    /// Read the snapshot. A missing file yields the seeded dataset without
    /// touching disk.
    pub fn load(&self) -> Result<Repository> {
        let path = self.state_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no snapshot, using seed data");
            return Ok(Repository::seeded());
        }
        let content = fs::read_to_string(&path)?;
        let repo: Repository = serde_json::from_str(&content)?;
        Ok(repo)
    }

    /// Replace the snapshot atomically. Callers mutating the store hold the
    /// lock from before `load` until after this returns.
    pub fn save(&self, repo: &Repository) -> Result<()> {
        let json = serde_json::to_string_pretty(repo)?;
        lock::write_atomic_str(self.state_path(), &json)?;
        tracing::debug!(
            tasks = repo.tasks.len(),
            categories = repo.categories.len(),
            "snapshot written"
        );
        Ok(())
    }

    /// Materialize the root: state directory, seed snapshot, and a default
    /// config file when absent. Returns true if a new snapshot was written.
    pub fn init(&self) -> Result<bool> {
        fs::create_dir_all(self.root.join(STATE_DIR))?;

        let config_path = self.config_path();
        if !config_path.exists() {
            Config::default().save(&config_path)?;
        }

        if self.state_path().exists() {
            return Ok(false);
        }
        let _lock = self.lock()?;
        self.save(&Repository::seeded())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_snapshot_loads_seed_data() {
        let dir = TempDir::new().unwrap();
        let root = DataRoot::new(dir.path());
        let repo = root.load().unwrap();
        assert_eq!(repo.tasks.len(), 3);
        assert!(!root.state_path().exists());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = TempDir::new().unwrap();
        let root = DataRoot::new(dir.path());

        let mut repo = root.load().unwrap();
        repo.tasks.remove(0);
        root.save(&repo).unwrap();

        let reloaded = root.load().unwrap();
        assert_eq!(reloaded.tasks.len(), 2);
        // Counter survives the roundtrip.
        assert_eq!(reloaded.next_task_id(), 4);
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let root = DataRoot::new(dir.path());

        assert!(root.init().unwrap());
        assert!(root.state_path().exists());
        assert!(root.config_path().exists());

        // A second init leaves existing state alone.
        let mut repo = root.load().unwrap();
        repo.tasks.clear();
        root.save(&repo).unwrap();
        assert!(!root.init().unwrap());
        assert!(root.load().unwrap().tasks.is_empty());
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let dir = TempDir::new().unwrap();
        let root = DataRoot::new(dir.path());
        std::fs::create_dir_all(dir.path().join(".taskdesk")).unwrap();
        std::fs::write(root.state_path(), "not json").unwrap();
        assert!(root.load().is_err());
    }
}
