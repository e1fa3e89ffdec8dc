//! Cryptographic helpers for CipherVault.
//!
//! This module provides:
//! - The two-stage rotation + base64 secret cipher (`cipher`)
//! - Master password hashing, strength rules and generation (`password`)

pub mod cipher;
pub mod password;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, CipherKey};
pub use cipher::{decrypt, encrypt, CipherKey};
pub use password::{generate_password, hash_password, validate_strength, verify_password};
