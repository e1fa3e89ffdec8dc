//! `ciphervault list` — display the owner's entries in a table.

use crate::cli::output;
use crate::cli::{open_session, open_store, Cli};
use crate::errors::Result;
use crate::store::RecordStore;
use crate::vault::VaultRepository;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (store, _) = open_store(cli)?;
    let session = open_session(cli, &store)?;
    let repo = VaultRepository::new(&store, &session);

    run(&repo)
}

/// List entries through an open repository.
pub fn run<S: RecordStore>(repo: &VaultRepository<'_, S>) -> Result<()> {
    let entries = repo.list()?;

    output::info(&format!("{} entries", entries.len()));
    output::print_entries_table(&entries);

    Ok(())
}
