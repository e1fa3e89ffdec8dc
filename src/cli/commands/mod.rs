//! Command implementations, one module per subcommand.
//!
//! Commands that touch the vault expose an `execute` entry point for the
//! one-shot CLI and a `run` function taking an open repository, which the
//! interactive `shell` reuses.

pub mod add;
pub mod audit_cmd;
pub mod delete;
pub mod edit;
pub mod generate;
pub mod list;
pub mod register;
pub mod search;
pub mod shell;
pub mod show;
pub mod sort;
pub mod stats;
