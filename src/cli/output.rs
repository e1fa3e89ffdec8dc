//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::audit::{AuditAction, AuditRecord, AuditStatistics};
use crate::store::TIMESTAMP_FORMAT;
use crate::vault::{VaultEntry, VaultOverview};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of entries (ID, Title, Account, Secret, Notes, Created).
/// Secrets are always masked here.
pub fn print_entries_table(entries: &[VaultEntry]) {
    if entries.is_empty() {
        info("No entries yet.");
        tip("Run `ciphervault add` to store your first credential.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Account", "Secret", "Notes", "Created"]);

    for e in entries {
        table.add_row(vec![
            e.id.clone(),
            e.title.clone(),
            e.account.clone(),
            e.masked_secret(),
            e.notes.clone(),
            e.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ]);
    }

    println!("{table}");
}

/// Print one entry as a two-column detail table.  `secret` replaces the
/// masked value when the caller has revealed it.
pub fn print_entry_detail(entry: &VaultEntry, secret: Option<&str>) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let secret_cell = match secret {
        Some(plain) => plain.to_string(),
        None => format!("{} (encrypted)", entry.masked_secret()),
    };

    table.add_row(vec!["ID".to_string(), entry.id.clone()]);
    table.add_row(vec!["Title".to_string(), entry.title.clone()]);
    table.add_row(vec!["Account".to_string(), entry.account.clone()]);
    table.add_row(vec!["Secret".to_string(), secret_cell]);
    table.add_row(vec!["Notes".to_string(), entry.notes.clone()]);
    table.add_row(vec![
        "Created".to_string(),
        entry.created_at.format(TIMESTAMP_FORMAT).to_string(),
    ]);

    println!("{table}");
}

/// Print audit records in a formatted table.
pub fn print_audit_table(title: &str, records: &[AuditRecord]) {
    if records.is_empty() {
        info("No audit entries found.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "User", "Action", "Details"]);

    for record in records {
        table.add_row(vec![
            record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            record.username.clone(),
            colorize_action(record.action),
            if record.details.is_empty() {
                "-".to_string()
            } else {
                record.details.clone()
            },
        ]);
    }

    println!(
        "{}",
        style(format!("{title} — {} entries:", records.len())).bold()
    );
    println!("{table}");
}

/// Print ledger statistics and, when given, the vault summary.
pub fn print_statistics(stats: &AuditStatistics, overview: Option<&VaultOverview>) {
    println!(
        "{}",
        style(format!("Statistics for {}", stats.username)).bold()
    );
    println!("Total activities : {}", stats.total_count);
    if let Some(first) = stats.first_timestamp {
        println!("First activity   : {}", first.format(TIMESTAMP_FORMAT));
    }
    if let Some(last) = stats.last_timestamp {
        println!("Last activity    : {}", last.format(TIMESTAMP_FORMAT));
    }

    if !stats.counts_by_action.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Action", "Count"]);
        for (action, count) in &stats.counts_by_action {
            table.add_row(vec![colorize_action(*action), count.to_string()]);
        }
        println!("{table}");
    }

    let Some(overview) = overview else {
        return;
    };
    println!();
    println!("{}", style("Vault").bold());
    println!("Total entries    : {}", overview.count);
    if let Some(newest) = &overview.newest {
        println!(
            "Latest entry     : {} ({})",
            newest.title,
            newest.created_at.format(TIMESTAMP_FORMAT)
        );
    }
    if let Some(oldest) = &overview.oldest {
        println!(
            "Oldest entry     : {} ({})",
            oldest.title,
            oldest.created_at.format(TIMESTAMP_FORMAT)
        );
    }
}

/// Colorize action names for display.
fn colorize_action(action: AuditAction) -> String {
    let name = action.as_str();
    match action {
        AuditAction::Register | AuditAction::Create => style(name).green().to_string(),
        AuditAction::Update => style(name).blue().to_string(),
        AuditAction::Delete => style(name).red().to_string(),
        AuditAction::Read => style(name).yellow().to_string(),
        AuditAction::Search | AuditAction::Sort => style(name).cyan().to_string(),
        AuditAction::Login | AuditAction::Logout => style(name).magenta().to_string(),
    }
}
