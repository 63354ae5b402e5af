//! Per-repository settings in `.git/git-squash/config.toml`.

use crate::error::{Error, Result};
use crate::types::{DEFAULT_REMOTE, DEFAULT_TARGET_BRANCH};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name for git-squash metadata within the git directory.
const CONFIG_DIR: &str = "git-squash";

/// Filename for the settings.
const CONFIG_FILE: &str = "config.toml";

/// Settings read from the repository's config file.
///
/// Every key is optional; command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SquashConfig {
    /// Branch to merge into
    pub target_branch: Option<String>,
    /// Remote holding the feature branch
    pub remote: Option<String>,
}

impl SquashConfig {
    /// Target branch: flag, then file, then `develop`.
    pub fn resolve_target(&self, flag: Option<&str>) -> String {
        flag.or(self.target_branch.as_deref())
            .unwrap_or(DEFAULT_TARGET_BRANCH)
            .to_string()
    }

    /// Remote: flag, then file, then `origin`.
    pub fn resolve_remote(&self, flag: Option<&str>) -> String {
        flag.or(self.remote.as_deref())
            .unwrap_or(DEFAULT_REMOTE)
            .to_string()
    }
}

/// Get path to the config file.
pub fn config_path(git_dir: &Path) -> PathBuf {
    git_dir.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load settings from disk.
///
/// Returns defaults if the file doesn't exist.
pub fn load_config(git_dir: &Path) -> Result<SquashConfig> {
    let path = config_path(git_dir);

    if !path.exists() {
        return Ok(SquashConfig::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}
