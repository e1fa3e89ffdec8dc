//! Project-level configuration (`.ciphervault.toml`).

pub mod settings;

pub use settings::Settings;
