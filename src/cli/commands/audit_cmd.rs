//! `ciphervault audit` — display the audit log.
//!
//! Usage:
//!   ciphervault audit               # your most recent entries (newest first)
//!   ciphervault audit --last 20     # your last 20
//!   ciphervault audit --all         # your full history, oldest first
//!   ciphervault audit --system      # every user's history

use crate::audit::AuditLedger;
use crate::auth::Authenticator;
use crate::cli::output;
use crate::cli::{open_session, open_store, Cli};
use crate::errors::Result;
use crate::store::RecordStore;

/// Which slice of the ledger to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditView {
    Recent(usize),
    All,
    System,
}

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: Option<usize>, all: bool, system: bool) -> Result<()> {
    let (store, settings) = open_store(cli)?;
    let session = open_session(cli, &store)?;

    let view = if system {
        AuditView::System
    } else if all {
        AuditView::All
    } else {
        AuditView::Recent(last.unwrap_or(settings.recent_limit))
    };

    run(&AuditLedger::new(&store), &session, view)
}

/// Print a view of the ledger for the session user.
pub fn run<S: RecordStore>(
    ledger: &AuditLedger<S>,
    auth: &dyn Authenticator,
    view: AuditView,
) -> Result<()> {
    let user = auth.current_user()?;

    match view {
        AuditView::Recent(n) => {
            let records = ledger.recent(user, n)?;
            output::print_audit_table(&format!("Recent activity for {user}"), &records);
        }
        AuditView::All => {
            let records = ledger.all(user)?;
            output::print_audit_table(&format!("Activity for {user}"), &records);
        }
        AuditView::System => {
            let records = ledger.all_system()?;
            output::print_audit_table("All system activity", &records);
        }
    }

    Ok(())
}
