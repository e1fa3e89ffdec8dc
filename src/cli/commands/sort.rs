//! `ciphervault sort` — list entries ordered by title or date.

use crate::cli::output;
use crate::cli::{open_session, open_store, Cli};
use crate::errors::Result;
use crate::store::RecordStore;
use crate::vault::sort::describe;
use crate::vault::{SortDirection, SortKey, VaultRepository};

/// Execute the `sort` command.
pub fn execute(cli: &Cli, by: &str, desc: bool) -> Result<()> {
    let key: SortKey = by.parse()?;
    let direction = if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    let (store, _) = open_store(cli)?;
    let session = open_session(cli, &store)?;
    let repo = VaultRepository::new(&store, &session);

    run(&repo, key, direction)
}

/// Sort through an open repository.
pub fn run<S: RecordStore>(
    repo: &VaultRepository<'_, S>,
    key: SortKey,
    direction: SortDirection,
) -> Result<()> {
    let sorted = repo.sort(key, direction)?;

    output::info(&format!("Sorted by: {}", describe(key, direction)));
    output::print_entries_table(&sorted);

    Ok(())
}
