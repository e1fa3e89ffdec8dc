//! `ciphervault shell` — interactive dashboard.
//!
//! Logs in once (recording LOGIN), then offers the vault operations from a
//! menu until the user logs out (recording LOGOUT).  Errors from a single
//! action are printed and the menu comes back.

use dialoguer::Select;

use crate::audit::AuditLedger;
use crate::auth::{Authenticator, UserDirectory};
use crate::cli::commands::{add, audit_cmd, delete, edit, list, search, show, sort, stats};
use crate::cli::output;
use crate::cli::{confirm, open_store, prompt_password, prompt_text, resolve_username, Cli};
use crate::config::Settings;
use crate::errors::{CipherVaultError, Result};
use crate::store::FileRecordStore;
use crate::vault::{NewEntry, SortDirection, SortKey, VaultRepository};

const MENU: [&str; 9] = [
    "Create new entry",
    "View all entries",
    "Search entries",
    "Update entry",
    "Delete entry",
    "Sort entries",
    "View audit log",
    "Account statistics",
    "Logout",
];

/// Execute the `shell` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (store, settings) = open_store(cli)?;

    let username = resolve_username(cli)?;
    let password = prompt_password()?;
    let mut session = UserDirectory::new(&store).login(&username, &password)?;
    drop(password);

    let user = session.current_user()?.to_string();
    output::success(&format!("Welcome, {user}!"));

    loop {
        let repo = VaultRepository::new(&store, &session);
        let choice = Select::new()
            .with_prompt(format!("Vault dashboard — {user}"))
            .items(&MENU)
            .default(0)
            .interact()
            .map_err(|e| CipherVaultError::CommandFailed(format!("menu: {e}")))?;

        if choice == MENU.len() - 1 {
            if confirm("Log out?")? {
                break;
            }
            continue;
        }

        if let Err(e) = dispatch(choice, &repo, &store, &session, &settings) {
            output::error(&e.to_string());
        }
    }

    session.logout(&AuditLedger::new(&store))?;
    output::success(&format!("Logged out. Goodbye, {user}!"));
    Ok(())
}

fn dispatch(
    choice: usize,
    repo: &VaultRepository<'_, FileRecordStore>,
    store: &FileRecordStore,
    auth: &dyn Authenticator,
    settings: &Settings,
) -> Result<()> {
    match choice {
        0 => {
            let title = prompt_text("Title (e.g. Gmail Account)", None)?;
            let account = prompt_text("Account / username", None)?;
            let mut secret = add::read_secret("Secret")?;
            let notes = prompt_text("Notes (optional)", Some(""))?;
            let draft = NewEntry {
                title,
                account,
                secret: std::mem::take(&mut *secret),
                notes,
            };
            add::run(repo, draft).map(|_| ())
        }
        1 => {
            list::run(repo)?;
            let id = prompt_text("View an entry? (id, empty to skip)", Some(""))?;
            if id.trim().is_empty() {
                return Ok(());
            }
            show::run(repo, id.trim(), true, false)
        }
        2 => {
            let keyword = prompt_text("Keyword (title/account)", None)?;
            search::run(repo, keyword.trim())
        }
        3 => {
            let id = prompt_text("Entry id to update", None)?;
            let changes = edit::prompt_changes(repo, id.trim())?;
            if !confirm("Save changes?")? {
                output::info("Update cancelled.");
                return Ok(());
            }
            edit::run(repo, id.trim(), changes)
        }
        4 => {
            let id = prompt_text("Entry id to delete", None)?;
            delete::run(repo, id.trim(), false)
        }
        5 => {
            let options = [
                (SortKey::Title, SortDirection::Ascending),
                (SortKey::Title, SortDirection::Descending),
                (SortKey::CreatedAt, SortDirection::Descending),
                (SortKey::CreatedAt, SortDirection::Ascending),
            ];
            let labels: Vec<&str> = options
                .iter()
                .map(|(k, d)| crate::vault::sort::describe(*k, *d))
                .collect();
            let picked = Select::new()
                .with_prompt("Sort by")
                .items(&labels)
                .default(0)
                .interact()
                .map_err(|e| CipherVaultError::CommandFailed(format!("menu: {e}")))?;
            let (key, direction) = options[picked];
            sort::run(repo, key, direction)
        }
        6 => {
            let views = ["My activities (all)", "Recent activities", "All system logs"];
            let picked = Select::new()
                .with_prompt("Audit log")
                .items(&views)
                .default(1)
                .interact()
                .map_err(|e| CipherVaultError::CommandFailed(format!("menu: {e}")))?;
            let view = match picked {
                0 => audit_cmd::AuditView::All,
                1 => audit_cmd::AuditView::Recent(settings.recent_limit),
                _ => audit_cmd::AuditView::System,
            };
            audit_cmd::run(&AuditLedger::new(store), auth, view)
        }
        7 => stats::run(&AuditLedger::new(store), repo, auth.current_user()?),
        _ => Ok(()),
    }
}
