use thiserror::Error;

/// All errors that can occur in CipherVault.
#[derive(Debug, Error)]
pub enum CipherVaultError {
    // --- Input errors ---
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Weak master password: {0}")]
    WeakPassword(String),

    // --- Vault errors ---
    #[error("Entry '{0}' not found")]
    NotFound(String),

    #[error("Identifier space exhausted — all of VAULT001..VAULT{0:03} are in use")]
    Exhausted(u32),

    // --- Account errors ---
    #[error("No active session — log in first")]
    Unauthenticated,

    #[error("Invalid username or master password")]
    InvalidCredentials,

    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Malformed record in {kind}: {reason}")]
    MalformedRecord { kind: &'static str, reason: String },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl CipherVaultError {
    /// Whether the ledger should still record the attempt that produced
    /// this error.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::Exhausted(_)
        )
    }
}

/// Convenience type alias for CipherVault results.
pub type Result<T> = std::result::Result<T, CipherVaultError>;
