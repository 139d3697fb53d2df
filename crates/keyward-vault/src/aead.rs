// SPDX-FileCopyrightText: 2026 Keyward Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level ChaCha20-Poly1305 seal/open operations.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce via the system
//! CSPRNG. Nonces are never derived or counted: keys here are either single-use
//! (DEKs) or see few enough messages that random nonces stay far from the
//! collision bound.

use keyward_core::KeywardError;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, CHACHA20_POLY1305};
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

use crate::keys::KEY_LEN;

/// Nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// Poly1305 tag length in bytes, appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Marker for an AEAD open failure. Callers map it to the
/// [`KeywardError::Decryption`] message that fits their layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenError;

fn less_safe_key(bytes: &[u8; KEY_LEN]) -> Result<LessSafeKey, ring::error::Unspecified> {
    UnboundKey::new(&CHACHA20_POLY1305, bytes).map(LessSafeKey::new)
}

/// Encrypt plaintext under `key` with a random nonce.
///
/// Returns `(ciphertext_with_tag, nonce_bytes)`; both must be stored.
pub fn seal(
    key_bytes: &[u8; KEY_LEN],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; NONCE_LEN]), KeywardError> {
    let key = less_safe_key(key_bytes)
        .map_err(|_| KeywardError::Internal("failed to create ChaCha20-Poly1305 key".to_string()))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    SystemRandom::new()
        .fill(&mut nonce_bytes)
        .map_err(|_| KeywardError::Internal("failed to generate random nonce".to_string()))?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    // Sealed in place: the buffer is extended with the tag.
    let mut in_out = plaintext.to_vec();
    key.seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| KeywardError::Internal("ChaCha20-Poly1305 encryption failed".to_string()))?;

    Ok((in_out, nonce_bytes))
}

/// Decrypt and authenticate `ciphertext` (tag included).
///
/// Fails with [`OpenError`] on a wrong key or a tampered nonce or ciphertext.
/// The plaintext buffer is zeroized on drop.
pub fn open(
    key_bytes: &[u8; KEY_LEN],
    nonce_bytes: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>, OpenError> {
    let key = less_safe_key(key_bytes).map_err(|_| OpenError)?;
    let nonce = Nonce::assume_unique_for_key(*nonce_bytes);

    let mut in_out = Zeroizing::new(ciphertext.to_vec());
    let plaintext_len = key
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| OpenError)?
        .len();
    in_out.truncate(plaintext_len);
    Ok(in_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_A: [u8; KEY_LEN] = [0x11; KEY_LEN];
    const KEY_B: [u8; KEY_LEN] = [0x22; KEY_LEN];

    #[test]
    fn seal_open_roundtrip() {
        let (ciphertext, nonce) = seal(&KEY_A, b"secret value").unwrap();
        let plaintext = open(&KEY_A, &nonce, &ciphertext).unwrap();
        assert_eq!(plaintext.as_slice(), b"secret value");
    }

    #[test]
    fn seal_uses_a_fresh_nonce_each_call() {
        let (ct1, nonce1) = seal(&KEY_A, b"same input twice").unwrap();
        let (ct2, nonce2) = seal(&KEY_A, b"same input twice").unwrap();
        assert_ne!(nonce1, nonce2);
        assert_ne!(ct1, ct2);
    }

    #[test]
    fn ciphertext_carries_the_tag() {
        let (ciphertext, _) = seal(&KEY_A, b"hello").unwrap();
        assert_eq!(ciphertext.len(), 5 + TAG_LEN);
    }

    #[test]
    fn empty_plaintext_still_authenticates() {
        let (ciphertext, nonce) = seal(&KEY_A, b"").unwrap();
        assert_eq!(ciphertext.len(), TAG_LEN);
        assert!(open(&KEY_A, &nonce, &ciphertext).unwrap().is_empty());
        assert!(matches!(open(&KEY_B, &nonce, &ciphertext), Err(OpenError)));
    }

    #[test]
    fn wrong_key_fails() {
        let (ciphertext, nonce) = seal(&KEY_A, b"secret").unwrap();
        assert!(matches!(open(&KEY_B, &nonce, &ciphertext), Err(OpenError)));
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let (mut ciphertext, nonce) = seal(&KEY_A, b"do not tamper").unwrap();
        ciphertext[0] ^= 0x01;
        assert!(matches!(open(&KEY_A, &nonce, &ciphertext), Err(OpenError)));
    }

    #[test]
    fn tampered_nonce_fails() {
        let (ciphertext, mut nonce) = seal(&KEY_A, b"do not tamper").unwrap();
        nonce[NONCE_LEN - 1] ^= 0x80;
        assert!(matches!(open(&KEY_A, &nonce, &ciphertext), Err(OpenError)));
    }

    #[test]
    fn truncated_ciphertext_fails() {
        let (ciphertext, nonce) = seal(&KEY_A, b"abc").unwrap();
        assert!(matches!(open(&KEY_A, &nonce, &ciphertext[..4]), Err(OpenError)));
    }
}
