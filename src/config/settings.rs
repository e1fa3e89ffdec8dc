use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CipherVaultError, Result};

/// Project-level configuration, loaded from `.ciphervault.toml`.
///
/// Every field has a sensible default so CipherVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the
    /// users, vault and audit files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// How many entries `audit` shows by default.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Length used by `generate` when none is given.
    #[serde(default = "default_generated_password_length")]
    pub generated_password_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_recent_limit() -> usize {
    10
}

fn default_generated_password_length() -> usize {
    12
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            recent_limit: default_recent_limit(),
            generated_password_length: default_generated_password_length(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".ciphervault.toml";

    /// Load settings from `<project_dir>/.ciphervault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CipherVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the data directory against `project_dir`.
    ///
    /// An explicit override (from `--data-dir`) wins over the config file.
    pub fn data_path(&self, project_dir: &Path, data_dir_override: Option<&str>) -> PathBuf {
        let dir = data_dir_override.unwrap_or(&self.data_dir);
        project_dir.join(dir)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
