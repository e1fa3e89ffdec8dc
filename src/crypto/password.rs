//! Master password hashing, strength rules, and the password generator.

use rand::seq::IndexedRandom;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::errors::{CipherVaultError, Result};

/// Minimum master password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Special characters used by the generator.
const SPECIAL: &[u8] = b"!@#$%^&*";

/// Shortest password the generator will produce (one of each class).
const MIN_GENERATED_LEN: usize = 4;

/// Hex-encoded SHA-256 of the password, as stored in `users.txt`.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Check a password against a stored hash in constant time.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let actual = hash_password(password);
    actual.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

/// Enforce the master password rules: at least eight characters with an
/// uppercase letter, a lowercase letter, and a digit.
pub fn validate_strength(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CipherVaultError::WeakPassword(format!(
            "must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(CipherVaultError::WeakPassword(
            "must contain an uppercase letter".into(),
        ));
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(CipherVaultError::WeakPassword(
            "must contain a lowercase letter".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(CipherVaultError::WeakPassword(
            "must contain a digit".into(),
        ));
    }
    Ok(())
}

/// Generate a random password containing at least one lowercase letter,
/// uppercase letter, digit, and special character.
pub fn generate_password(length: usize) -> String {
    let length = length.max(MIN_GENERATED_LEN);
    let alphabet: Vec<u8> = (b'a'..=b'z')
        .chain(b'A'..=b'Z')
        .chain(b'0'..=b'9')
        .chain(SPECIAL.iter().copied())
        .collect();

    let mut rng = rand::rng();
    loop {
        let candidate: String = (0..length)
            .filter_map(|_| alphabet.choose(&mut rng))
            .map(|&b| char::from(b))
            .collect();

        if has_every_class(&candidate) {
            return candidate;
        }
    }
}

fn has_every_class(password: &str) -> bool {
    password.bytes().any(|b| b.is_ascii_lowercase())
        && password.bytes().any(|b| b.is_ascii_uppercase())
        && password.bytes().any(|b| b.is_ascii_digit())
        && password.bytes().any(|b| SPECIAL.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn verify_accepts_only_matching_password() {
        let stored = hash_password("Secret123");
        assert!(verify_password("Secret123", &stored));
        assert!(!verify_password("secret123", &stored));
    }

    #[test]
    fn strength_rules() {
        assert!(validate_strength("Abcdefg1").is_ok());
        assert!(validate_strength("Abc1").is_err());
        assert!(validate_strength("abcdefg1").is_err());
        assert!(validate_strength("ABCDEFG1").is_err());
        assert!(validate_strength("Abcdefgh").is_err());
    }

    #[test]
    fn generated_password_has_every_class() {
        for _ in 0..20 {
            let pw = generate_password(12);
            assert_eq!(pw.len(), 12);
            assert!(has_every_class(&pw));
        }
    }

    #[test]
    fn generated_password_respects_floor() {
        assert_eq!(generate_password(1).len(), MIN_GENERATED_LEN);
    }
}
