//! `ciphervault add` — store a new credential.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_session, open_store, prompt_text, Cli};
use crate::crypto::generate_password;
use crate::errors::{CipherVaultError, Result};
use crate::store::RecordStore;
use crate::vault::{NewEntry, VaultEntry, VaultRepository};

/// Field values given on the command line; missing ones are prompted.
#[derive(Debug, Default)]
pub struct AddArgs<'a> {
    pub title: Option<&'a str>,
    pub account: Option<&'a str>,
    pub secret: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub generate: bool,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: AddArgs<'_>) -> Result<()> {
    let (store, settings) = open_store(cli)?;
    let session = open_session(cli, &store)?;
    let repo = VaultRepository::new(&store, &session);

    let interactive = args.title.is_none() || args.account.is_none();

    let title = match args.title {
        Some(t) => t.to_string(),
        None => prompt_text("Title (e.g. Gmail Account)", None)?,
    };
    let account = match args.account {
        Some(a) => a.to_string(),
        None => prompt_text("Account / username", None)?,
    };

    let mut secret = if args.generate {
        let generated = Zeroizing::new(generate_password(settings.generated_password_length));
        output::info(&format!("Generated secret: {}", generated.as_str()));
        generated
    } else if let Some(s) = args.secret {
        output::warning("Secret provided on command line — it may appear in shell history.");
        Zeroizing::new(s.to_string())
    } else {
        read_secret("Secret")?
    };

    let notes = match args.notes {
        Some(n) => n.to_string(),
        None if interactive => prompt_text("Notes (optional)", Some(""))?,
        None => String::new(),
    };

    let entry = run(
        &repo,
        NewEntry {
            title,
            account,
            secret: std::mem::take(&mut *secret),
            notes,
        },
    )?;

    output::tip(&format!("View it with: ciphervault show {}", entry.id));
    Ok(())
}

/// Create an entry through an open repository.
pub fn run<S: RecordStore>(repo: &VaultRepository<'_, S>, draft: NewEntry) -> Result<VaultEntry> {
    let entry = repo.create(draft)?;
    output::success(&format!(
        "Entry '{}' created with id {} — secret stored encrypted",
        entry.title, entry.id
    ));
    Ok(entry)
}

/// Read a secret from piped stdin or a hidden interactive prompt.
pub fn read_secret(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = Zeroizing::new(buf.trim_end().to_string());
        return Ok(trimmed);
    }

    let secret = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| CipherVaultError::CommandFailed(format!("secret prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}
