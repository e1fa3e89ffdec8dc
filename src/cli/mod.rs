//! CLI module — Clap argument parser, prompts, output helpers, and command
//! implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::auth::{Session, UserDirectory};
use crate::config::Settings;
use crate::errors::{CipherVaultError, Result};
use crate::store::FileRecordStore;

/// Environment variable holding the master password (scripts / CI).
pub const PASSWORD_ENV: &str = "CIPHERVAULT_PASSWORD";

/// CipherVault CLI: offline credential vault.
#[derive(Parser)]
#[command(
    name = "ciphervault",
    about = "Offline credential vault with an audit trail",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: data, or `data_dir` in .ciphervault.toml)
    #[arg(long, env = "CIPHERVAULT_DATA_DIR", global = true)]
    pub data_dir: Option<String>,

    /// Username to act as (prompted if omitted)
    #[arg(short, long, env = "CIPHERVAULT_USER", global = true)]
    pub user: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Register a new user
    Register {
        /// Username (letters, digits, underscore; at least 3 characters)
        username: Option<String>,
    },

    /// Add a credential entry
    Add {
        /// Entry title (e.g. "Gmail")
        #[arg(long)]
        title: Option<String>,
        /// Account or login name
        #[arg(long)]
        account: Option<String>,
        /// Secret value (omit for interactive prompt)
        #[arg(long)]
        secret: Option<String>,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
        /// Generate a strong random secret
        #[arg(long, conflicts_with = "secret")]
        generate: bool,
    },

    /// List your entries
    List,

    /// Show one entry
    Show {
        /// Entry id (e.g. VAULT001)
        id: String,
        /// Decrypt and print the secret
        #[arg(long)]
        reveal: bool,
        /// Skip the reveal confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Edit an entry (only the given fields change)
    Edit {
        /// Entry id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        secret: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Search entries by title or account
    Search {
        /// Case-insensitive keyword
        keyword: String,
    },

    /// List entries in a chosen order
    Sort {
        /// Sort key: title or date
        #[arg(long, default_value = "title")]
        by: String,
        /// Descending order (Z-A, newest first)
        #[arg(long)]
        desc: bool,
    },

    /// View the audit log
    Audit {
        /// Number of recent entries to show (default from config)
        #[arg(long, conflicts_with_all = ["all", "system"])]
        last: Option<usize>,
        /// Your full history, oldest first
        #[arg(long, conflicts_with = "system")]
        all: bool,
        /// Every user's history
        #[arg(long)]
        system: bool,
    },

    /// Show account and vault statistics
    Stats,

    /// Generate a strong random password
    Generate {
        /// Password length (default from config)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Interactive dashboard
    Shell,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Settings from the working directory plus the resolved data path.
pub fn load_settings(cli: &Cli) -> Result<(Settings, PathBuf)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let data_path = settings.data_path(&cwd, cli.data_dir.as_deref());
    Ok((settings, data_path))
}

/// Open the file-backed store at the configured data directory.
pub fn open_store(cli: &Cli) -> Result<(FileRecordStore, Settings)> {
    let (settings, data_path) = load_settings(cli)?;
    let store = FileRecordStore::open(&data_path)?;
    Ok((store, settings))
}

/// Username from `--user` / `CIPHERVAULT_USER`, or an interactive prompt.
pub fn resolve_username(cli: &Cli) -> Result<String> {
    if let Some(user) = cli.user.as_deref().filter(|u| !u.trim().is_empty()) {
        return Ok(user.trim().to_string());
    }
    prompt_text("Username", None)
}

/// Get the master password, trying in order:
/// 1. `CIPHERVAULT_PASSWORD` env var
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| CipherVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used by
/// `register`).  Also respects `CIPHERVAULT_PASSWORD`.  Strength rules are
/// enforced by the user directory.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Choose master password")
        .with_confirmation("Confirm master password", "Passwords do not match")
        .interact()
        .map_err(|e| CipherVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Ask for a line of text, with an optional default shown in brackets.
pub fn prompt_text(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(default.is_some());
    if let Some(d) = default {
        input = input.default(d.to_string()).show_default(true);
    }
    input
        .interact_text()
        .map_err(|e| CipherVaultError::CommandFailed(format!("input prompt: {e}")))
}

/// Ask a yes/no question (default: no).
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CipherVaultError::CommandFailed(format!("confirm prompt: {e}")))
}

/// Authenticate against the users file without recording a LOGIN.
pub fn open_session(cli: &Cli, store: &FileRecordStore) -> Result<Session> {
    let username = resolve_username(cli)?;
    let password = prompt_password()?;
    UserDirectory::new(store).authenticate(&username, &password)
}
