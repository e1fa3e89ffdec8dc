//! `ciphervault delete` — remove an entry permanently.

use crate::cli::output;
use crate::cli::{confirm, open_session, open_store, Cli};
use crate::errors::Result;
use crate::store::RecordStore;
use crate::vault::VaultRepository;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    let (store, _) = open_store(cli)?;
    let session = open_session(cli, &store)?;
    let repo = VaultRepository::new(&store, &session);

    run(&repo, id, force)
}

/// Delete through an open repository.  Asks for confirmation unless
/// `force` is set.
pub fn run<S: RecordStore>(repo: &VaultRepository<'_, S>, id: &str, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Delete entry '{id}'? This cannot be undone"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    let removed = repo.delete(id)?;
    output::success(&format!("Deleted entry '{}' ({})", removed.title, removed.id));

    Ok(())
}
