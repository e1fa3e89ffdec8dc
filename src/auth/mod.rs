//! User accounts and sessions.
//!
//! Accounts live in the users record kind as
//! `username|sha256Hex(masterPassword)|createdDate`.  Logging in verifies
//! the hash and yields a [`Session`] that carries the username and the
//! cipher key derived from the same master password.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::audit::{AuditAction, AuditLedger};
use crate::crypto::{hash_password, validate_strength, verify_password, CipherKey};
use crate::errors::{CipherVaultError, Result};
use crate::store::record::DATE_FORMAT;
use crate::store::{join_fields, sanitize, split_fields, RecordKind, RecordStore};

/// Minimum username length.
const MIN_USERNAME_LEN: usize = 3;

/// Source of the authenticated identity for vault operations.
pub trait Authenticator {
    /// Username of the active session.
    fn current_user(&self) -> Result<&str>;

    /// Cipher key of the active session.
    fn cipher_key(&self) -> Result<&CipherKey>;
}

/// An authenticated user plus their session key.
#[derive(Debug)]
pub struct Session {
    active: Option<ActiveUser>,
}

#[derive(Debug)]
struct ActiveUser {
    username: String,
    key: CipherKey,
}

impl Session {
    /// Start a session for a user whose password was already checked.
    pub fn new(username: &str, master_password: &str) -> Self {
        Self {
            active: Some(ActiveUser {
                username: username.to_string(),
                key: CipherKey::derive(master_password),
            }),
        }
    }

    /// A session nobody is logged into.
    pub fn anonymous() -> Self {
        Self { active: None }
    }

    pub fn is_logged_in(&self) -> bool {
        self.active.is_some()
    }

    /// End the session, recording LOGOUT.  The key is dropped (and
    /// zeroized) even if the ledger write fails.
    pub fn logout<S: RecordStore>(&mut self, ledger: &AuditLedger<S>) -> Result<()> {
        let active = self.active.take().ok_or(CipherVaultError::Unauthenticated)?;
        info!(user = %active.username, "logout");
        ledger.record(&active.username, AuditAction::Logout, "User logged out")
    }
}

impl Authenticator for Session {
    fn current_user(&self) -> Result<&str> {
        self.active
            .as_ref()
            .map(|a| a.username.as_str())
            .ok_or(CipherVaultError::Unauthenticated)
    }

    fn cipher_key(&self) -> Result<&CipherKey> {
        self.active
            .as_ref()
            .map(|a| &a.key)
            .ok_or(CipherVaultError::Unauthenticated)
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    /// Missing on accounts written by older versions.
    pub created: Option<NaiveDate>,
}

impl UserRecord {
    fn to_line(&self) -> String {
        let created = self
            .created
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        join_fields(&[&self.username, &self.password_hash, &created])
    }

    fn parse(line: &str) -> Result<Self> {
        let fields = split_fields(line);
        let (username, hash, created) = match fields.as_slice() {
            [user, hash] => (*user, *hash, None),
            [user, hash, created] => (*user, *hash, Some(*created)),
            _ => {
                return Err(CipherVaultError::MalformedRecord {
                    kind: RecordKind::Users.label(),
                    reason: format!("expected 2 or 3 fields, found {}", fields.len()),
                })
            }
        };

        Ok(Self {
            username: username.to_string(),
            password_hash: hash.to_string(),
            created: created
                .filter(|c| !c.is_empty())
                .and_then(|c| NaiveDate::parse_from_str(c, DATE_FORMAT).ok()),
        })
    }
}

/// Registration and login over the users record kind.
pub struct UserDirectory<'s, S: RecordStore> {
    store: &'s S,
    ledger: AuditLedger<&'s S>,
}

impl<'s, S: RecordStore> UserDirectory<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            ledger: AuditLedger::new(store),
        }
    }

    /// Create an account.  Records REGISTER on success.
    pub fn register(&self, username: &str, master_password: &str) -> Result<UserRecord> {
        let username = sanitize(username);
        validate_username(&username)?;
        validate_strength(master_password)?;

        if self.find(&username)?.is_some() {
            return Err(CipherVaultError::UserAlreadyExists(username));
        }

        let user = UserRecord {
            username: username.clone(),
            password_hash: hash_password(master_password),
            created: Some(Local::now().date_naive()),
        };
        self.store.append(RecordKind::Users, &user.to_line())?;

        info!(user = %username, "registered");
        self.ledger
            .record(&username, AuditAction::Register, "New user registered")?;
        Ok(user)
    }

    /// Check credentials without touching the ledger.
    pub fn authenticate(&self, username: &str, master_password: &str) -> Result<Session> {
        let username = sanitize(username);
        let user = self
            .find(&username)?
            .ok_or(CipherVaultError::InvalidCredentials)?;

        if !verify_password(master_password, &user.password_hash) {
            return Err(CipherVaultError::InvalidCredentials);
        }

        Ok(Session::new(&user.username, master_password))
    }

    /// Check credentials and record LOGIN.
    pub fn login(&self, username: &str, master_password: &str) -> Result<Session> {
        let session = self.authenticate(username, master_password)?;
        let user = session.current_user()?;
        info!(user = %user, "login");
        self.ledger
            .record(user, AuditAction::Login, "User logged in successfully")?;
        Ok(session)
    }

    /// Look up an account by name (case-insensitive).
    pub fn find(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .users()?
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(username)))
    }

    /// Every parseable account, in registration order.
    pub fn users(&self) -> Result<Vec<UserRecord>> {
        let lines = self.store.read_all(RecordKind::Users)?;
        let mut users = Vec::with_capacity(lines.len());
        for (idx, line) in lines.iter().enumerate() {
            match UserRecord::parse(line) {
                Ok(user) => users.push(user),
                Err(e) => warn!(line = idx + 1, error = %e, "skipping user line"),
            }
        }
        Ok(users)
    }
}

/// Usernames: at least three characters, ASCII letters, digits, or `_`.
pub fn validate_username(username: &str) -> Result<()> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(CipherVaultError::Validation(format!(
            "username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(CipherVaultError::Validation(format!(
            "username '{username}' may only contain letters, digits, and underscores"
        )));
    }
    Ok(())
}
