//! `ciphervault stats` — ledger statistics plus a vault summary.

use crate::audit::AuditLedger;
use crate::auth::Authenticator;
use crate::cli::output;
use crate::cli::{open_session, open_store, Cli};
use crate::errors::Result;
use crate::store::RecordStore;
use crate::vault::VaultRepository;

/// Execute the `stats` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (store, _) = open_store(cli)?;
    let session = open_session(cli, &store)?;
    let repo = VaultRepository::new(&store, &session);

    run(&AuditLedger::new(&store), &repo, session.current_user()?)
}

/// Print statistics for `user`.
pub fn run<S: RecordStore, L: RecordStore>(
    ledger: &AuditLedger<L>,
    repo: &VaultRepository<'_, S>,
    user: &str,
) -> Result<()> {
    let stats = ledger.statistics(user)?;
    let overview = repo.overview()?;
    let overview = (overview.count > 0).then_some(&overview);

    output::print_statistics(&stats, overview);

    Ok(())
}
