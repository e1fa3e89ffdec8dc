//! `ciphervault generate` — print a strong random password.

use crate::cli::{load_settings, Cli};
use crate::crypto::generate_password;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, length: Option<usize>) -> Result<()> {
    let (settings, _) = load_settings(cli)?;
    let length = length.unwrap_or(settings.generated_password_length);

    println!("{}", generate_password(length));

    Ok(())
}
