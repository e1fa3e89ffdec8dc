//! `ciphervault edit` — change fields of an existing entry.
//!
//! With field flags only those fields change.  Without any, every field is
//! prompted with its current value as the default (an empty secret keeps
//! the current one).

use crate::cli::output;
use crate::cli::{open_session, open_store, prompt_text, Cli};
use crate::errors::{CipherVaultError, Result};
use crate::store::RecordStore;
use crate::vault::{EntryUpdate, VaultRepository};

/// Execute the `edit` command.
pub fn execute(cli: &Cli, id: &str, changes: EntryUpdate) -> Result<()> {
    let (store, _) = open_store(cli)?;
    let session = open_session(cli, &store)?;
    let repo = VaultRepository::new(&store, &session);

    let changes = if changes.is_empty() {
        prompt_changes(&repo, id)?
    } else {
        if changes.secret.is_some() {
            output::warning("Secret provided on command line — it may appear in shell history.");
        }
        changes
    };

    run(&repo, id, changes)
}

/// Apply an update through an open repository.
pub fn run<S: RecordStore>(
    repo: &VaultRepository<'_, S>,
    id: &str,
    changes: EntryUpdate,
) -> Result<()> {
    if changes.is_empty() {
        output::info("Nothing to change.");
        return Ok(());
    }

    let entry = repo.update(id, changes)?;
    output::success(&format!("Entry '{}' ({}) updated", entry.title, entry.id));

    Ok(())
}

/// Prompt for every field, only keeping the ones that differ.
pub fn prompt_changes<S: RecordStore>(
    repo: &VaultRepository<'_, S>,
    id: &str,
) -> Result<EntryUpdate> {
    let current = repo.read(id)?;
    output::print_entry_detail(&current, None);

    let title = prompt_text("New title", Some(&current.title))?;
    let account = prompt_text("New account", Some(&current.account))?;
    let secret = dialoguer::Password::new()
        .with_prompt("New secret (leave empty to keep)")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| CipherVaultError::CommandFailed(format!("secret prompt: {e}")))?;
    let notes = prompt_text("New notes", Some(&current.notes))?;

    Ok(EntryUpdate {
        title: (title != current.title).then_some(title),
        account: (account != current.account).then_some(account),
        secret: (!secret.is_empty()).then_some(secret),
        notes: (notes != current.notes).then_some(notes),
    })
}
