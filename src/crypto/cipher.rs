//! Two-stage reversible cipher for stored secrets.
//!
//! Stage 1 rotates ASCII letters by a shift derived from the master
//! password (case preserved, everything else untouched).  Stage 2 encodes
//! the rotated UTF-8 bytes as standard padded base64 (RFC 4648 §4) so the
//! result is safe to store in a pipe-delimited line.
//!
//! There is no authentication tag: decrypting with the wrong key does not
//! fail, it silently returns the wrong plaintext.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::{CipherVaultError, Result};

/// Size of the rotation alphabet.
const ALPHABET_LEN: u8 = 26;

/// Session key for the cipher.  Only the rotation amount survives
/// derivation; it is wiped when the session ends.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CipherKey {
    shift: u8,
}

impl CipherKey {
    /// Derive the key from a master password: the sum of its character
    /// codes, reduced modulo 26.
    pub fn derive(master_password: &str) -> Self {
        let sum: u64 = master_password.chars().map(|c| u64::from(c as u32)).sum();
        Self {
            shift: (sum % u64::from(ALPHABET_LEN)) as u8,
        }
    }

    /// Build a key from an arbitrary integer.  Negative values wrap the
    /// same way as positive ones (`-1` is a shift of 25).
    pub fn from_raw(key: i64) -> Self {
        Self {
            shift: key.rem_euclid(i64::from(ALPHABET_LEN)) as u8,
        }
    }

    /// Rotation amount in `0..26`.
    pub fn shift(&self) -> u8 {
        self.shift
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CipherKey(..)")
    }
}

/// Encrypt `plaintext`: rotate, then base64-encode.
pub fn encrypt(plaintext: &str, key: &CipherKey) -> String {
    let rotated = Zeroizing::new(rotate(plaintext, key.shift));
    BASE64.encode(rotated.as_bytes())
}

/// Decrypt data produced by [`encrypt`].
///
/// Fails only when `ciphertext` is not base64 of UTF-8 text, which
/// `encrypt` never produces.
pub fn decrypt(ciphertext: &str, key: &CipherKey) -> Result<Zeroizing<String>> {
    let bytes = BASE64
        .decode(ciphertext.trim())
        .map_err(|e| malformed(format!("secret is not valid base64: {e}")))?;

    let rotated = String::from_utf8(bytes).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        malformed("secret is not valid UTF-8".to_string())
    })?;
    let rotated = Zeroizing::new(rotated);

    let inverse = (ALPHABET_LEN - key.shift) % ALPHABET_LEN;
    Ok(Zeroizing::new(rotate(&rotated, inverse)))
}

/// Rotate every ASCII letter forward by `shift` positions.
fn rotate(text: &str, shift: u8) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' => rotate_from(c, b'a', shift),
            'A'..='Z' => rotate_from(c, b'A', shift),
            _ => c,
        })
        .collect()
}

fn rotate_from(c: char, base: u8, shift: u8) -> char {
    let offset = (c as u8 - base + shift) % ALPHABET_LEN;
    char::from(base + offset)
}

fn malformed(reason: String) -> CipherVaultError {
    CipherVaultError::MalformedRecord {
        kind: "vault",
        reason,
    }
}
