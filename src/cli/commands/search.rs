//! `ciphervault search` — find entries by title or account.

use crate::cli::output;
use crate::cli::{open_session, open_store, Cli};
use crate::errors::Result;
use crate::store::RecordStore;
use crate::vault::VaultRepository;

/// Execute the `search` command.
pub fn execute(cli: &Cli, keyword: &str) -> Result<()> {
    let (store, _) = open_store(cli)?;
    let session = open_session(cli, &store)?;
    let repo = VaultRepository::new(&store, &session);

    run(&repo, keyword)
}

/// Search through an open repository.
pub fn run<S: RecordStore>(repo: &VaultRepository<'_, S>, keyword: &str) -> Result<()> {
    if keyword.trim().is_empty() {
        output::warning("Empty keyword matches nothing.");
    }

    let results = repo.search(keyword)?;

    if results.is_empty() {
        output::info(&format!("No entries match '{keyword}'."));
        return Ok(());
    }

    output::info(&format!("Found {} entries matching '{keyword}'", results.len()));
    output::print_entries_table(&results);

    Ok(())
}
