//! `ciphervault register` — create a user account.

use crate::auth::UserDirectory;
use crate::cli::output;
use crate::cli::{open_store, prompt_new_password, resolve_username, Cli};
use crate::errors::Result;

/// Execute the `register` command.
pub fn execute(cli: &Cli, username: Option<&str>) -> Result<()> {
    let (store, _) = open_store(cli)?;

    let username = match username {
        Some(u) => u.to_string(),
        None => resolve_username(cli)?,
    };
    let password = prompt_new_password()?;

    let user = UserDirectory::new(&store).register(&username, &password)?;

    output::success(&format!("User '{}' registered", user.username));
    output::tip(&format!(
        "Add your first entry: ciphervault --user {} add",
        user.username
    ));

    Ok(())
}
