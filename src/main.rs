use clap::Parser;
use tracing_subscriber::EnvFilter;

use ciphervault::cli::commands::add::AddArgs;
use ciphervault::cli::{Cli, Commands};
use ciphervault::vault::EntryUpdate;

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "CIPHERVAULT_LOG";

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Register { ref username } => {
            ciphervault::cli::commands::register::execute(&cli, username.as_deref())
        }
        Commands::Add {
            ref title,
            ref account,
            ref secret,
            ref notes,
            generate,
        } => ciphervault::cli::commands::add::execute(
            &cli,
            AddArgs {
                title: title.as_deref(),
                account: account.as_deref(),
                secret: secret.as_deref(),
                notes: notes.as_deref(),
                generate,
            },
        ),
        Commands::List => ciphervault::cli::commands::list::execute(&cli),
        Commands::Show {
            ref id,
            reveal,
            yes,
        } => ciphervault::cli::commands::show::execute(&cli, id, reveal, yes),
        Commands::Edit {
            ref id,
            ref title,
            ref account,
            ref secret,
            ref notes,
        } => ciphervault::cli::commands::edit::execute(
            &cli,
            id,
            EntryUpdate {
                title: title.clone(),
                account: account.clone(),
                secret: secret.clone(),
                notes: notes.clone(),
            },
        ),
        Commands::Delete { ref id, force } => {
            ciphervault::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::Search { ref keyword } => {
            ciphervault::cli::commands::search::execute(&cli, keyword)
        }
        Commands::Sort { ref by, desc } => {
            ciphervault::cli::commands::sort::execute(&cli, by, desc)
        }
        Commands::Audit { last, all, system } => {
            ciphervault::cli::commands::audit_cmd::execute(&cli, last, all, system)
        }
        Commands::Stats => ciphervault::cli::commands::stats::execute(&cli),
        Commands::Generate { length } => {
            ciphervault::cli::commands::generate::execute(&cli, length)
        }
        Commands::Shell => ciphervault::cli::commands::shell::execute(&cli),
    };

    if let Err(e) = result {
        ciphervault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `CIPHERVAULT_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
