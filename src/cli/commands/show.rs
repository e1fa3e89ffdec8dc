//! `ciphervault show` — display one entry, optionally revealing its secret.

use crate::cli::output;
use crate::cli::{confirm, open_session, open_store, Cli};
use crate::errors::Result;
use crate::store::RecordStore;
use crate::vault::VaultRepository;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str, reveal: bool, yes: bool) -> Result<()> {
    let (store, _) = open_store(cli)?;
    let session = open_session(cli, &store)?;
    let repo = VaultRepository::new(&store, &session);

    run(&repo, id, reveal, yes)
}

/// Show an entry through an open repository.
///
/// Revealing asks for confirmation unless `yes` is set.
pub fn run<S: RecordStore>(
    repo: &VaultRepository<'_, S>,
    id: &str,
    reveal: bool,
    yes: bool,
) -> Result<()> {
    let entry = repo.read(id)?;

    if !reveal {
        output::print_entry_detail(&entry, None);
        output::tip(&format!("Reveal the secret with: ciphervault show {id} --reveal"));
        return Ok(());
    }

    if !yes && !confirm("Show the secret in plain text?")? {
        output::print_entry_detail(&entry, None);
        output::info("Secret not revealed.");
        return Ok(());
    }

    let secret = repo.reveal(&entry)?;
    output::print_entry_detail(&entry, Some(secret.as_str()));
    output::tip("A wrong master password shows scrambled text instead of an error.");

    Ok(())
}
