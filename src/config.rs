//! Configuration loading and management
//!
//! Handles parsing of `taskdesk.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::query::ListLimits;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// User id that may request global statistics
    #[serde(default = "default_admin_user_id")]
    pub admin_user_id: u64,

    /// User to act as when no `--user` flag or env override is given
    #[serde(default)]
    pub default_user_id: Option<u64>,

    /// Listing configuration
    #[serde(default)]
    pub list: ListConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_user_id: default_admin_user_id(),
            default_user_id: None,
            list: ListConfig::default(),
        }
    }
}

fn default_admin_user_id() -> u64 {
    1
}

/// Listing-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Page size when the request does not specify one
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Largest page size a request may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    100
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl ListConfig {
    pub fn limits(&self) -> ListLimits {
        ListLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}

impl Config {
    /// Load configuration from a `taskdesk.toml` file
    pub fn load(path: &PathBuf) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the data root, or return defaults
    pub fn load_from_root(root: &PathBuf) -> Self {
        let config_path = root.join("taskdesk.toml");
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &PathBuf) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.admin_user_id == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "admin_user_id must be >= 1".to_string(),
            ));
        }
        if self.default_user_id == Some(0) {
            return Err(crate::error::Error::InvalidConfig(
                "default_user_id must be >= 1".to_string(),
            ));
        }
        if self.list.default_page_size == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "list.default_page_size must be > 0".to_string(),
            ));
        }
        if self.list.max_page_size == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "list.max_page_size must be > 0".to_string(),
            ));
        }
        if self.list.default_page_size > self.list.max_page_size {
            return Err(crate::error::Error::InvalidConfig(
                "list.default_page_size must be <= list.max_page_size".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.admin_user_id, 1);
        assert_eq!(cfg.default_user_id, None);
        assert_eq!(cfg.list.default_page_size, 10);
        assert_eq!(cfg.list.max_page_size, 100);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("taskdesk.toml");
        let content = r#"
admin_user_id = 7
default_user_id = 2

[list]
default_page_size = 25
max_page_size = 50
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.admin_user_id, 7);
        assert_eq!(cfg.default_user_id, Some(2));
        assert_eq!(cfg.list.default_page_size, 25);
        assert_eq!(cfg.list.max_page_size, 50);
    }

    #[test]
    fn invalid_page_sizes_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("taskdesk.toml");
        let content = r#"
[list]
default_page_size = 200
max_page_size = 100
"#;
        fs::write(&path, content.trim()).expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            crate::error::Error::InvalidConfig(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_admin_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("taskdesk.toml");
        fs::write(&path, "admin_user_id = 0").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            crate::error::Error::InvalidConfig(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_from_root_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_root(&dir.path().to_path_buf());
        assert_eq!(cfg.admin_user_id, 1);
    }

    #[test]
    fn load_from_root_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("taskdesk.toml");
        fs::write(&path, "admin_user_id = 3").expect("write config");

        let cfg = Config::load_from_root(&dir.path().to_path_buf());
        assert_eq!(cfg.admin_user_id, 3);
    }

    #[test]
    fn save_writes_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.toml");
        let cfg = Config::default();
        cfg.save(&path).expect("save config");

        let written = fs::read_to_string(&path).expect("read config");
        assert!(written.contains("admin_user_id = 1"));
    }
}
